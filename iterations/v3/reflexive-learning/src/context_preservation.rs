//! Context preservation engine


pub struct ContextPreservationEngine {
    // TODO: Implement context preservation with the following requirements:
    // 1. Context capture: Capture and store learning context
    //    - Record learning session context and state
    //    - Store learning progress and intermediate results
    //    - Capture learning environment and configuration
    // 2. Context persistence: Persist context across learning sessions
    //    - Store context in persistent storage
    //    - Handle context serialization and deserialization
    //    - Implement context versioning and migration
    // 3. Context retrieval: Retrieve and restore learning context
    //    - Load context for learning session resumption
    //    - Handle context search and filtering
    //    - Implement context sharing and collaboration
    // 4. Context management: Manage context lifecycle and storage
    //    - Handle context cleanup and garbage collection
    //    - Implement context compression and optimization
    //    - Manage context storage limits and quotas
    // 5. Context analysis: Analyze context for learning insights
    //    - Extract learning patterns and trends
    //    - Identify context dependencies and relationships
    //    - Generate context-based learning recommendations
}

impl ContextPreservationEngine {
    pub fn new() -> Self {
        Self {}
    }
}
