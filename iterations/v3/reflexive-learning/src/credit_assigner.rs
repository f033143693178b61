//! Credit assignment for learning

pub struct CreditAssigner {
    // TODO: Implement credit assignment with the following requirements:
    // 1. Credit calculation: Calculate credit for learning contributions
    //    - Assess individual contributions to learning outcomes
    //    - Weight contributions based on quality and impact
    //    - Consider temporal factors and contribution timing
    // 2. Credit distribution: Distribute credit among learning participants
    //    - Allocate credit based on contribution quality and quantity
    //    - Handle credit sharing and collaborative contributions
    //    - Implement fair and transparent credit allocation
    // 3. Credit tracking: Track credit over time and across sessions
    //    - Maintain credit history and accumulation
    //    - Handle credit transfers and adjustments
    //    - Implement credit decay and expiration policies
    // 4. Credit validation: Validate credit assignments and distributions
    //    - Verify credit calculations and distributions
    //    - Handle credit disputes and corrections
    //    - Implement credit audit and verification processes
    // 5. Credit utilization: Enable credit utilization for learning benefits
    //    - Allow credit redemption for learning resources
    //    - Implement credit-based learning incentives
    //    - Handle credit-based access control and privileges
}

impl CreditAssigner {
    pub fn new() -> Self {
        Self {}
    }
}
