pub mod agent;
pub mod behavior;
pub mod cognitive;

pub use agent::{create_agent_with_neural_brain, AgentStats, IntelligentAgent, XP_PER_LEVEL};
pub use behavior::BehaviorType;
pub use cognitive::{CognitiveState, ExperienceKind};
