//! Example: Using CoreML-Anything for automated technical diagram generation
//!
//! This example demonstrates how to integrate CoreML-Anything with the documentation system
//! to automatically generate technical illustrations from text descriptions.

use agent_agency_apple_silicon::ane::models::diffusion_model::{
    DiffusionModel, GenerationOptions, ImageMetadata
};
use agent_agency_apple_silicon::telemetry::TelemetryCollector;
use std::path::Path;

/// Example: Generate architecture diagram from specification
pub async fn generate_architecture_diagram(spec: &ArchitectureSpec) -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Create technical prompt for diagram generation
    let prompt = create_architecture_prompt(spec)?;

    // Initialize telemetry for monitoring
    let telemetry = TelemetryCollector::new();

    // Configure generation options for technical diagrams
    let options = GenerationOptions {
        inference_steps: 30,
        guidance_scale: 7.5,
        seed: Some(42), // Reproducible generation
        width: 1024,
        height: 768,
    };

    // Create placeholder circuit breaker (would be properly implemented)
    // For demo purposes, we'll use a mock circuit breaker
    let circuit_breaker = MockCircuitBreaker;

    // Load CoreML-Anything model (placeholder - would load actual model)
    let model = load_diffusion_model(&telemetry, circuit_breaker).await?;

    // Generate diagram
    let generated_image = model.generate_image(&prompt, &options).await?;

    // Save to documentation assets
    let image_path = save_diagram_image(generated_image, spec.name).await?;

    println!(" Generated architecture diagram: {}", image_path.display());
    println!("   Prompt: {}", prompt);
    println!("   Generation time: {}ms", generated_image.metadata.generation_time_ms);
    println!("   Quality score: {:.2}", generated_image.metadata.quality_score);

    Ok(image_path)
}

/// Create detailed prompt for architecture diagram generation
fn create_architecture_prompt(spec: &ArchitectureSpec) -> Result<String, Box<dyn std::error::Error>> {
    let mut prompt = format!(
        "Create a technical architecture diagram for {}: {}",
        spec.name, spec.description
    );

    // Add component details
    if !spec.components.is_empty() {
        prompt.push_str("\n\nComponents:");
        for component in &spec.components {
            prompt.push_str(&format!("\n- {}: {}", component.name, component.description));
        }
    }

    // Add data flow information
    if !spec.data_flows.is_empty() {
        prompt.push_str("\n\nData Flow:");
        for flow in &spec.data_flows {
            prompt.push_str(&format!("\n- {} → {}: {}", flow.from, flow.to, flow.description));
        }
    }

    // Technical styling instructions
    prompt.push_str("\n\nStyle: Clean technical diagram, white background, blue and green color scheme, clear labels, professional appearance, system architecture style");

    Ok(prompt)
}

/// Load diffusion model (placeholder implementation)
async fn load_diffusion_model(
    telemetry: &TelemetryCollector,
    circuit_breaker: MockCircuitBreaker,
) -> Result<DiffusionModel, Box<dyn std::error::Error>> {
    // In real implementation, this would load the actual CoreML-Anything model
    // For now, return a mock/placeholder model

    println!(" Loading CoreML-Anything model...");
    println!("   Model: CoreML-Anything-V3.1");
    println!("   Size: ~2.1GB");
    println!("   Precision: FP16");
    println!("   Target: Apple Silicon ANE");

    // Load the actual CoreML-Anything model from disk
    let model_path = Path::new("../../models/diffusion/anything-v3-1_split-einsum");
    let model = DiffusionModel::load(&model_path, telemetry.clone(), circuit_breaker).await?;

    println!(" CoreML-Anything model loaded successfully");
    Ok(model)
}

/// Save generated diagram to documentation assets
async fn save_diagram_image(
    generated_image: GeneratedImage,
    diagram_name: &str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    use std::fs;
    use image::{RgbImage, ImageBuffer};

    // Create output directory
    let output_dir = Path::new("docs/assets/diagrams/generated");
    fs::create_dir_all(output_dir)?;

    // Convert pixel data to image (simplified - would handle actual pixel format)
    // In real implementation, this would properly decode the generated image
    let width = generated_image.pixels.dim().3;
    let height = generated_image.pixels.dim().2;

    // Create placeholder RGB image
    let img = ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
        // Placeholder: create a gradient pattern
        let r = ((x as f32 / width as f32) * 255.0) as u8;
        let g = ((y as f32 / height as f32) * 255.0) as u8;
        let b = 128u8;
        image::Rgb([r, g, b])
    });

    // Save as PNG
    let filename = format!("{}.png", diagram_name.replace(" ", "_").to_lowercase());
    let output_path = output_dir.join(filename);

    img.save(&output_path)?;

    Ok(output_path)
}

// Mock circuit breaker for demonstration
struct MockCircuitBreaker;

impl MockCircuitBreaker {
    async fn acquire(&self) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

/// Architecture specification for diagram generation
pub struct ArchitectureSpec {
    pub name: String,
    pub description: String,
    pub components: Vec<ComponentSpec>,
    pub data_flows: Vec<DataFlowSpec>,
}

/// Component in the architecture
pub struct ComponentSpec {
    pub name: String,
    pub description: String,
    pub component_type: ComponentType,
}

/// Types of architectural components
pub enum ComponentType {
    Service,
    Database,
    Queue,
    Gateway,
    Worker,
}

/// Data flow between components
pub struct DataFlowSpec {
    pub from: String,
    pub to: String,
    pub description: String,
    pub data_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_architecture_prompt() {
        let spec = ArchitectureSpec {
            name: "Agent Agency V3".to_string(),
            description: "Multi-modal AI agent system with constitutional concurrency".to_string(),
            components: vec![
                ComponentSpec {
                    name: "Council".to_string(),
                    description: "Judges evaluate worker outputs using constitutional principles".to_string(),
                    component_type: ComponentType::Service,
                },
                ComponentSpec {
                    name: "Workers".to_string(),
                    description: "Specialized AI agents executing tasks".to_string(),
                    component_type: ComponentType::Worker,
                },
            ],
            data_flows: vec![
                DataFlowSpec {
                    from: "Workers".to_string(),
                    to: "Council".to_string(),
                    description: "Structured outputs for evaluation".to_string(),
                    data_type: "TaskResult".to_string(),
                },
            ],
        };

        let prompt = create_architecture_prompt(&spec).unwrap();

        assert!(prompt.contains("Agent Agency V3"));
        assert!(prompt.contains("Council"));
        assert!(prompt.contains("Workers"));
        assert!(prompt.contains("constitutional principles"));
        assert!(prompt.contains("technical diagram"));
        assert!(prompt.contains("white background"));
    }

    #[test]
    fn test_generation_options_defaults() {
        let options = GenerationOptions::default();

        assert_eq!(options.inference_steps, 30);
        assert_eq!(options.guidance_scale, 7.5);
        assert_eq!(options.width, 512);
        assert_eq!(options.height, 512);
        assert!(options.seed.is_none());
    }

    #[tokio::test]
    async fn test_diagram_generation_workflow() {
        // This test would run the full workflow with a mock model
        // For now, just test that the structure is sound

        let spec = ArchitectureSpec {
            name: "Test System".to_string(),
            description: "Test architecture for diagram generation".to_string(),
            components: vec![],
            data_flows: vec![],
        };

        let prompt = create_architecture_prompt(&spec).unwrap();
        assert!(prompt.contains("Test System"));
        assert!(prompt.contains("Test architecture"));
    }
}
