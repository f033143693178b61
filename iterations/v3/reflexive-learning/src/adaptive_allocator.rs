//! Adaptive resource allocation


pub struct AdaptiveResourceAllocator {
    // TODO: Implement adaptive resource allocation with the following requirements:
    // 1. Resource monitoring: Monitor system resources and usage
    //    - Track CPU, memory, and storage utilization
    //    - Monitor network bandwidth and I/O performance
    //    - Collect resource usage metrics and trends
    // 2. Resource allocation: Allocate resources based on demand and availability
    //    - Distribute resources among learning tasks and processes
    //    - Implement resource prioritization and scheduling
    //    - Handle resource contention and conflict resolution
    // 3. Adaptive optimization: Optimize resource allocation based on performance
    //    - Adjust resource allocation based on learning performance
    //    - Implement dynamic resource scaling and adjustment
    //    - Handle resource optimization and efficiency improvements
    // 4. Resource management: Manage resource lifecycle and availability
    //    - Handle resource provisioning and deprovisioning
    //    - Implement resource pooling and sharing
    //    - Manage resource limits and quotas
    // 5. Resource prediction: Predict resource needs and requirements
    //    - Forecast resource demand based on learning patterns
    //    - Implement predictive resource allocation
    //    - Handle resource planning and capacity management
}

impl AdaptiveResourceAllocator {
    pub fn new() -> Self {
        Self {}
    }
}
