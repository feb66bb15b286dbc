// FICHIER : src-engine/src/society/stats.rs

use super::graph::AgentSociety;
use crate::utils::{prelude::*, BTreeMap};

/// Photographie agrégée d'une société. Une société vide donne des zéros.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SocietyStats {
    pub total_agents: usize,
    pub total_connections: usize,
    /// Degré moyen (chaque lien compte pour ses deux extrémités).
    pub avg_connections: f64,
    pub avg_experience: f64,
    pub avg_cognitive_capacity: f64,
    pub avg_level: f64,
    /// Liens existants / liens possibles.
    pub density: f64,
    pub components: usize,
    pub total_interactions: u64,
    pub behavior_distribution: BTreeMap<String, usize>,
}

impl SocietyStats {
    pub(crate) fn collect(society: &AgentSociety) -> Self {
        let n = society.len();
        let total_connections = society.edge_count();
        let mut stats = SocietyStats {
            total_agents: n,
            total_connections,
            components: society.connected_components(),
            total_interactions: society.total_interactions(),
            ..Default::default()
        };
        if n == 0 {
            return stats;
        }

        let count = n as f64;
        let mut connections = 0usize;
        let mut experience = 0.0;
        let mut capacity = 0.0;
        let mut level = 0.0;
        for agent in society.agents() {
            connections += agent.social_connections();
            experience += agent.experience_points() as f64;
            capacity += agent.cognition().capacity();
            level += agent.level() as f64;
            *stats
                .behavior_distribution
                .entry(agent.behavior().to_string())
                .or_insert(0) += 1;
        }

        stats.avg_connections = connections as f64 / count;
        stats.avg_experience = experience / count;
        stats.avg_cognitive_capacity = capacity / count;
        stats.avg_level = level / count;
        if n > 1 {
            stats.density = 2.0 * total_connections as f64 / (count * (count - 1.0));
        }
        stats
    }
}
