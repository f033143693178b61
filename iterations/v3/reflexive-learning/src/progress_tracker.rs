//! Progress tracking for learning sessions

pub struct ProgressTracker {
    // TODO: Implement progress tracking with the following requirements:
    // 1. Progress monitoring: Monitor learning progress and milestones
    //    - Track learning session progress and completion
    //    - Monitor learning objectives and goal achievement
    //    - Record learning milestones and achievements
    // 2. Progress metrics: Collect and analyze progress metrics
    //    - Measure learning performance and effectiveness
    //    - Track learning speed and efficiency
    //    - Analyze learning patterns and trends
    // 3. Progress reporting: Generate progress reports and insights
    //    - Create progress summaries and status reports
    //    - Generate learning analytics and insights
    //    - Provide progress visualization and dashboards
    // 4. Progress optimization: Optimize learning progress and outcomes
    //    - Identify learning bottlenecks and obstacles
    //    - Suggest learning improvements and optimizations
    //    - Implement adaptive learning strategies
    // 5. Progress persistence: Persist progress data and history
    //    - Store progress data in persistent storage
    //    - Maintain progress history and trends
    //    - Handle progress data backup and recovery
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {}
    }
}
