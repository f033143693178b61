use clap::{Parser, Subcommand};
use recovery::{
    api::RecoveryStore,
    cas::BlobStore,
    index::RecoveryIndex,
    journal::WriteAheadLog,
    merkle::{Commit, FileTree},
    policy::{
        CawsPolicy, PolicyEnforcer, RetentionPolicy, 
        CompressionPolicy, ChunkingPolicy, RedactionPolicy, RedactionRule,
        ProvenancePolicy, RecoveryPolicy, StoragePolicy, ChunkingMode,
        RedactionRuleType, CheckpointFrequency
    },
    types::*,
};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "recov")]
#[command(about = "V3 Recovery System CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new recovery store
    Init {
        /// Path to initialize the recovery store
        #[arg(short, long, default_value = ".v3rec")]
        path: PathBuf,
        /// Storage budget in MB
        #[arg(long, default_value = "512")]
        budget_mb: u64,
    },
    /// Track file changes in a session
    Track {
        /// Session ID to track changes in
        #[arg(short, long)]
        session: String,
        /// Path to track
        #[arg(short, long)]
        path: PathBuf,
    },
    /// Create a checkpoint
    Checkpoint {
        /// Session ID to checkpoint
        #[arg(short, long)]
        session: String,
        /// Optional label for the checkpoint
        #[arg(short, long)]
        label: Option<String>,
    },
    /// Plan a restore operation
    Plan {
        /// Target commit or ref to restore from
        #[arg(short, long)]
        target: String,
        /// Output directory for restore
        #[arg(short, long)]
        output: PathBuf,
        /// Glob patterns to include
        #[arg(long)]
        include: Vec<String>,
        /// Glob patterns to exclude
        #[arg(long)]
        exclude: Vec<String>,
    },
    /// Execute a restore operation
    Restore {
        /// Target commit or ref to restore from
        #[arg(short, long)]
        target: String,
        /// Output directory for restore
        #[arg(short, long)]
        output: PathBuf,
        /// Glob patterns to include
        #[arg(long)]
        include: Vec<String>,
        /// Glob patterns to exclude
        #[arg(long)]
        exclude: Vec<String>,
        /// Dry run (preview only)
        #[arg(long)]
        dry_run: bool,
    },
    /// Pack cold objects
    Pack {
        /// Minimum age in hours for objects to pack
        #[arg(long, default_value = "168")] // 1 week
        min_age_hours: u64,
        /// Maximum pack size in MB
        #[arg(long, default_value = "100")]
        max_pack_mb: u64,
    },
    /// Run garbage collection
    Gc {
        /// Dry run (preview only)
        #[arg(long)]
        dry_run: bool,
        /// Force GC even if budget not exceeded
        #[arg(long)]
        force: bool,
    },
    /// Verify store integrity
    Fsck {
        /// Scope of verification
        #[arg(long, default_value = "full")]
        scope: String,
        /// Rebuild index from Merkle trees
        #[arg(long)]
        reindex: bool,
    },
    /// Show statistics
    Stat {
        /// Show detailed breakdown
        #[arg(long)]
        detailed: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path, budget_mb } => {
            init_recovery_store(&path, budget_mb).await?;
        }
        Commands::Track { session, path } => {
            track_file_changes(&session, &path).await?;
        }
        Commands::Checkpoint { session, label } => {
            create_checkpoint(&session, label.as_deref()).await?;
        }
        Commands::Plan {
            target,
            output,
            include,
            exclude,
        } => {
            plan_restore(&target, &output, &include, &exclude).await?;
        }
        Commands::Restore {
            target,
            output,
            include,
            exclude,
            dry_run,
        } => {
            execute_restore(&target, &output, &include, &exclude, dry_run).await?;
        }
        Commands::Pack {
            min_age_hours,
            max_pack_mb,
        } => {
            pack_cold_objects(min_age_hours, max_pack_mb).await?;
        }
        Commands::Gc { dry_run, force } => {
            run_garbage_collection(dry_run, force).await?;
        }
        Commands::Fsck { scope, reindex } => {
            verify_store_integrity(&scope, reindex).await?;
        }
        Commands::Stat { detailed } => {
            show_statistics(detailed).await?;
        }
    }

    Ok(())
}

async fn init_recovery_store(path: &PathBuf, budget_mb: u64) -> anyhow::Result<()> {
    info!("Initializing recovery store at {:?}", path);

    // Create directory structure
    std::fs::create_dir_all(path)?;
    std::fs::create_dir_all(path.join("objects"))?;
    std::fs::create_dir_all(path.join("refs"))?;
    std::fs::create_dir_all(path.join("packs"))?;

    // Initialize WAL
    let wal_path = path.join("journal.wal");
    let _wal = WriteAheadLog::new(wal_path)?;

    // Initialize index
    let index_path = path.join("index.db");
    let _index = RecoveryIndex::new(&index_path.to_string_lossy()).await?;

    // Create default CAWS policy
    let policy = CawsPolicy {
        storage: StoragePolicy {
            max_size_bytes: budget_mb * 1024 * 1024,
            soft_limit_ratio: 0.8,
            hard_limit_ratio: 0.95,
            auto_gc: true,
            auto_pack: true,
        },
        retention: RetentionPolicy {
            min_days: 30,
            max_sessions: 200,
            protected_labels: vec!["release/*".to_string(), "postmortem/*".to_string()],
            protected_patterns: vec!["prod/*".to_string()],
        },
        compression: CompressionPolicy {
            default_codec: Codec::Zstd,
            level: 4,
            overrides: std::collections::HashMap::new(),
        },
        chunking: ChunkingPolicy {
            mode: ChunkingMode::Cdc,
            target_size: 16 * 1024, // 16 KiB
            min_size: 4 * 1024,    // 4 KiB
            max_size: 64 * 1024,   // 64 KiB
            enable_cdc: true,
        },
        redaction: RedactionPolicy {
            enable_secret_scanning: true,
            enable_pii_scanning: true,
            custom_rules: vec![
                RedactionRule {
                    name: "RSA Keys".to_string(),
                    rule_type: RedactionRuleType::Secret,
                    pattern: "BEGIN RSA PRIVATE KEY".to_string(),
                    case_sensitive: false,
                    min_length: Some(10),
                    max_length: None,
                },
            ],
            block_on_secrets: true,
            log_redactions: true,
        },
        provenance: ProvenancePolicy {
            enable_file_tracking: true,
            enable_change_attribution: true,
            enable_recovery_capability: true,
            require_verdict_on_restore: vec!["prod/*".to_string()],
            track_agent_iterations: true,
            track_human_edits: true,
        },
        recovery: RecoveryPolicy {
            auto_checkpoint: true,
            checkpoint_frequency: vec![CheckpointFrequency::EveryIteration],
            enable_restore_verification: true,
            enable_conflict_resolution: true,
            max_restore_size: Some(100 * 1024 * 1024), // 100 MB
        },
    };
    let policy_path = path.join("policy.yaml");
    std::fs::write(&policy_path, serde_yaml::to_string(&policy)?)?;

    info!("Recovery store initialized successfully");
    info!("Storage budget: {} MB", budget_mb);
    info!("Policy saved to {:?}", policy_path);

    Ok(())
}

async fn track_file_changes(session: &str, path: &PathBuf) -> anyhow::Result<()> {
    info!("Tracking file changes for session {} at {:?}", session, path);

    // TODO: Implement file change tracking
    // This would involve:
    // 1. Reading the file content
    // 2. Computing its digest
    // 3. Recording the change in the session
    // 4. Applying content strategy (full/diff/chunk)
    // 5. Storing in CAS with proper metadata

    warn!("File change tracking not yet implemented");
    Ok(())
}

async fn create_checkpoint(session: &str, label: Option<&str>) -> anyhow::Result<()> {
    info!("Creating checkpoint for session {}", session);
    if let Some(label) = label {
        info!("Checkpoint label: {}", label);
    }

    // TODO: Implement checkpoint creation
    // This would involve:
    // 1. Creating a Merkle tree from current workspace state
    // 2. Creating a commit with the tree
    // 3. Updating session ref to point to new commit
    // 4. Recording checkpoint in journal

    warn!("Checkpoint creation not yet implemented");
    Ok(())
}

async fn plan_restore(
    target: &str,
    output: &PathBuf,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<()> {
    info!("Planning restore from {} to {:?}", target, output);
    info!("Include patterns: {:?}", include);
    info!("Exclude patterns: {:?}", exclude);

    // TODO: Implement restore planning
    // This would involve:
    // 1. Resolving target to commit digest
    // 2. Building restore plan with file operations
    // 3. Applying include/exclude filters
    // 4. Previewing the plan

    warn!("Restore planning not yet implemented");
    Ok(())
}

async fn execute_restore(
    target: &str,
    output: &PathBuf,
    include: &[String],
    exclude: &[String],
    dry_run: bool,
) -> anyhow::Result<()> {
    info!("Executing restore from {} to {:?}", target, output);
    if dry_run {
        info!("DRY RUN - no changes will be made");
    }

    // TODO: Implement restore execution
    // This would involve:
    // 1. Creating restore plan
    // 2. If dry_run, just show the plan
    // 3. Otherwise, apply the restore plan atomically
    // 4. Verify digests of restored files

    warn!("Restore execution not yet implemented");
    Ok(())
}

async fn pack_cold_objects(min_age_hours: u64, max_pack_mb: u64) -> anyhow::Result<()> {
    info!("Packing cold objects (age >= {}h, max size {}MB)", min_age_hours, max_pack_mb);

    // TODO: Implement object packing
    // This would involve:
    // 1. Identifying cold objects (not accessed recently)
    // 2. Grouping them into packs
    // 3. Creating pack files with index
    // 4. Removing loose objects

    warn!("Object packing not yet implemented");
    Ok(())
}

async fn run_garbage_collection(dry_run: bool, force: bool) -> anyhow::Result<()> {
    info!("Running garbage collection");
    if dry_run {
        info!("DRY RUN - no objects will be deleted");
    }
    if force {
        info!("FORCE - running GC even if budget not exceeded");
    }

    // TODO: Implement garbage collection
    // This would involve:
    // 1. Marking reachable objects from protected refs
    // 2. Applying grace period for recently created objects
    // 3. Sweeping unreachable objects
    // 4. Packing cold objects

    warn!("Garbage collection not yet implemented");
    Ok(())
}

async fn verify_store_integrity(scope: &str, reindex: bool) -> anyhow::Result<()> {
    info!("Verifying store integrity (scope: {})", scope);
    if reindex {
        info!("Rebuilding index from Merkle trees");
    }

    // TODO: Implement integrity verification
    // This would involve:
    // 1. Checking all objects are reachable
    // 2. Verifying Merkle tree integrity
    // 3. Checking journal consistency
    // 4. If reindex, rebuilding SQLite from Merkle trees

    warn!("Integrity verification not yet implemented");
    Ok(())
}

async fn show_statistics(detailed: bool) -> anyhow::Result<()> {
    info!("Showing recovery store statistics");
    if detailed {
        info!("Detailed breakdown requested");
    }

    // TODO: Implement statistics display
    // This would involve:
    // 1. Counting objects by type
    // 2. Showing storage usage
    // 3. Displaying deduplication ratio
    // 4. Showing GC statistics

    warn!("Statistics display not yet implemented");
    Ok(())
}