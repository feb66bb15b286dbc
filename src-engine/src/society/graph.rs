// FICHIER : src-engine/src/society/graph.rs

use super::stats::SocietyStats;
use crate::agents::IntelligentAgent;
use crate::utils::{prelude::*, Arc, BTreeMap, HashMap, Instant, RwLock};
use rand::prelude::*;
use rayon::prelude::*;
use std::collections::btree_map::Entry;

/// Expérience sociale accordée à chaque participant d'une rencontre réussie.
pub const SOCIAL_EXPERIENCE: u64 = 10;
/// Renforcement d'un lien existant lors d'une nouvelle rencontre réussie.
const EDGE_REINFORCEMENT: f64 = 0.1;

/// Société partagée entre threads : un seul écrivain, plusieurs lecteurs.
pub type SharedSociety = Arc<RwLock<AgentSociety>>;

/// Retour explicite sur un lien existant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InteractionKind {
    PositiveFeedback,
    NegativeFeedback,
    Collaboration,
    Conflict,
    Trade { success: bool },
}

impl InteractionKind {
    pub fn strength_delta(self) -> f64 {
        match self {
            InteractionKind::PositiveFeedback => 0.05,
            InteractionKind::NegativeFeedback => -0.05,
            InteractionKind::Collaboration => 0.03,
            InteractionKind::Conflict => -0.08,
            InteractionKind::Trade { success: true } => 0.02,
            InteractionKind::Trade { success: false } => -0.02,
        }
    }
}

/// Société d'agents : propriétaire exclusif des agents, graphe non orienté pondéré.
///
/// Une arête est stockée une seule fois sous la clé `(min(a, b), max(a, b))` :
/// ni boucle, ni doublon. Les `BTreeMap` fixent l'ordre d'itération, ce qui rend
/// les simulations reproductibles à graine égale.
#[derive(Debug, Clone, Default)]
pub struct AgentSociety {
    agents: BTreeMap<String, IntelligentAgent>,
    edges: BTreeMap<(String, String), f64>,
    total_interactions: u64,
}

fn edge_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Compatibilité de deux agents : plus leurs capacités sont proches, plus elle est forte.
pub fn compatibility(a: &IntelligentAgent, b: &IntelligentAgent) -> f64 {
    let gap = (a.cognition().capacity() - b.cognition().capacity()).abs();
    (1.0 - gap).clamp(0.0, 1.0)
}

impl AgentSociety {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construit une société ; échoue au premier identifiant en double.
    pub fn with_agents(agents: impl IntoIterator<Item = IntelligentAgent>) -> Result<Self> {
        let mut society = Self::new();
        for agent in agents {
            society.add_agent(agent)?;
        }
        Ok(society)
    }

    pub fn into_shared(self) -> SharedSociety {
        Arc::new(RwLock::new(self))
    }

    pub fn add_agent(&mut self, agent: IntelligentAgent) -> Result<()> {
        if self.agents.contains_key(agent.id()) {
            return Err(AppError::DuplicateId(agent.id().to_string()));
        }
        debug!("Agent {} rejoint la société ({})", agent.id(), agent.behavior());
        let mut agent = agent;
        // Le compteur n'a de sens que relativement à ce graphe
        agent.set_social_connections(0);
        self.agents.insert(agent.id().to_string(), agent);
        Ok(())
    }

    /// Retire un agent et tous ses liens.
    pub fn remove_agent(&mut self, id: &str) -> Result<IntelligentAgent> {
        let agent = self
            .agents
            .remove(id)
            .ok_or_else(|| AppError::NotFound(format!("agent {}", id)))?;
        self.edges.retain(|(a, b), _| a != id && b != id);
        self.refresh_connections();
        Ok(agent)
    }

    pub fn get_agent(&self, id: &str) -> Option<&IntelligentAgent> {
        self.agents.get(id)
    }

    pub fn get_agent_mut(&mut self, id: &str) -> Option<&mut IntelligentAgent> {
        self.agents.get_mut(id)
    }

    /// Agents dans l'ordre de leurs identifiants.
    pub fn agents(&self) -> impl Iterator<Item = &IntelligentAgent> {
        self.agents.values()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn total_interactions(&self) -> u64 {
        self.total_interactions
    }

    pub fn connection_strength(&self, a: &str, b: &str) -> Option<f64> {
        self.edges.get(&edge_key(a, b)).copied()
    }

    /// Voisins d'un agent avec la force de chaque lien.
    pub fn neighbors(&self, id: &str) -> Vec<(&str, f64)> {
        self.edges
            .iter()
            .filter_map(|((a, b), strength)| {
                if a == id {
                    Some((b.as_str(), *strength))
                } else if b == id {
                    Some((a.as_str(), *strength))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Influence : `capacité × (1 + somme des forces des liens)`.
    pub fn influence(&self, id: &str) -> Result<f64> {
        let agent = self
            .agents
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("agent {}", id)))?;
        let strength: f64 = self.neighbors(id).iter().map(|(_, s)| s).sum();
        Ok(agent.cognition().capacity() * (1.0 + strength))
    }

    /// Somme des forces de liens par agent, en un seul passage sur les arêtes.
    fn strength_sums(&self) -> HashMap<&str, f64> {
        let mut sums: HashMap<&str, f64> = HashMap::new();
        for ((a, b), strength) in &self.edges {
            *sums.entry(a.as_str()).or_insert(0.0) += strength;
            *sums.entry(b.as_str()).or_insert(0.0) += strength;
        }
        sums
    }

    /// Recalcule `social_connections` (degré) pour tous les agents.
    fn refresh_connections(&mut self) {
        let mut degrees: HashMap<String, usize> = HashMap::new();
        for (a, b) in self.edges.keys() {
            *degrees.entry(a.clone()).or_insert(0) += 1;
            *degrees.entry(b.clone()).or_insert(0) += 1;
        }
        for (id, agent) in self.agents.iter_mut() {
            agent.set_social_connections(degrees.get(id).copied().unwrap_or(0));
        }
    }

    /// Avance l'horloge de tous les agents.
    pub fn tick_all(&mut self) {
        self.agents.values_mut().for_each(IntelligentAgent::tick);
    }

    /// Tente `count` rencontres entre deux agents distincts tirés uniformément.
    /// Une rencontre réussit avec une probabilité égale à la compatibilité ; elle crée
    /// le lien (force initiale = compatibilité) ou le renforce.
    /// Renvoie le nombre de liens créés ou renforcés.
    #[instrument(skip(self, rng))]
    pub fn simulate_interactions(&mut self, count: usize, rng: &mut dyn RngCore) -> Result<usize> {
        if self.agents.len() < 2 {
            debug!("Moins de deux agents : aucune rencontre possible");
            return Ok(0);
        }
        let timer = Instant::now();
        let ids: Vec<String> = self.agents.keys().cloned().collect();

        // 1. Tirages séquentiels (reproductibles)
        let draws: Vec<(usize, usize, f64)> = (0..count)
            .map(|_| {
                let pair = rand::seq::index::sample(&mut *rng, ids.len(), 2);
                (pair.index(0), pair.index(1), rng.random::<f64>())
            })
            .collect();

        // 2. Compatibilités en parallèle, lecture seule
        let successes: Vec<Option<f64>> = {
            let agents: Vec<&IntelligentAgent> = self.agents.values().collect();
            draws
                .par_iter()
                .map(|&(i, j, roll)| {
                    let score = compatibility(agents[i], agents[j]);
                    (roll < score).then_some(score)
                })
                .collect()
        };

        // 3. Écritures séquentielles sur le graphe
        let mut created_or_strengthened = 0;
        for (&(i, j, _), outcome) in draws.iter().zip(successes) {
            let Some(score) = outcome else { continue };
            match self.edges.entry(edge_key(&ids[i], &ids[j])) {
                Entry::Vacant(slot) => {
                    slot.insert(score);
                }
                Entry::Occupied(mut slot) => {
                    let strength = slot.get_mut();
                    *strength = (*strength + EDGE_REINFORCEMENT).min(1.0);
                }
            }
            for id in [&ids[i], &ids[j]] {
                if let Some(agent) = self.agents.get_mut(id) {
                    agent.gain_experience(SOCIAL_EXPERIENCE, "social");
                }
            }
            created_or_strengthened += 1;
        }

        self.total_interactions += count as u64;
        self.refresh_connections();
        info!(
            "{} rencontres simulées, {} liens créés ou renforcés en {}ms",
            count,
            created_or_strengthened,
            timer.elapsed().as_millis()
        );
        Ok(created_or_strengthened)
    }

    /// Ajuste la force d'un lien existant. Un lien dont la force tombe à zéro disparaît.
    /// Renvoie la nouvelle force.
    pub fn record_interaction(&mut self, a: &str, b: &str, kind: InteractionKind) -> Result<f64> {
        if a == b {
            return Err(AppError::Validation(format!(
                "un agent ne peut pas interagir avec lui-même ({})",
                a
            )));
        }
        for id in [a, b] {
            if !self.agents.contains_key(id) {
                return Err(AppError::NotFound(format!("agent {}", id)));
            }
        }
        let key = edge_key(a, b);
        let strength = self.edges.get_mut(&key).ok_or_else(|| {
            AppError::Precondition(format!("aucun lien entre {} et {}", a, b))
        })?;

        *strength = (*strength + kind.strength_delta()).clamp(0.0, 1.0);
        let updated = *strength;
        if updated == 0.0 {
            self.edges.remove(&key);
            self.refresh_connections();
            debug!("Lien {} - {} rompu", a, b);
        }
        self.total_interactions += 1;
        Ok(updated)
    }

    /// Décision collective : décisions individuelles en parallèle, puis moyenne
    /// pondérée par l'influence, réduite séquentiellement dans l'ordre des identifiants.
    /// Si toutes les influences sont nulles, la moyenne n'est pas pondérée.
    pub fn collective_decision(&self, situation: &[f64]) -> Result<Vec<f64>> {
        if self.agents.is_empty() {
            return Err(AppError::Precondition(
                "décision collective sur une société vide".to_string(),
            ));
        }
        let timer = Instant::now();
        let sums = self.strength_sums();
        let agents: Vec<&IntelligentAgent> = self.agents.values().collect();

        let decisions = agents
            .par_iter()
            .map(|agent| -> Result<(Vec<f64>, f64)> {
                let decision = agent.make_decision(situation)?;
                let links = sums.get(agent.id()).copied().unwrap_or(0.0);
                Ok((decision, agent.cognition().capacity() * (1.0 + links)))
            })
            .collect::<Result<Vec<_>>>()?;

        let width = decisions[0].0.len();
        if let Some((other, _)) = decisions.iter().find(|(d, _)| d.len() != width) {
            return Err(AppError::dimension("décisions individuelles", width, other.len()));
        }

        let total_weight: f64 = decisions.iter().map(|(_, w)| w).sum();
        let weighted = total_weight > 0.0 && total_weight.is_finite();
        if !weighted {
            warn!("Influences toutes nulles : moyenne non pondérée");
        }

        let mut collective = vec![0.0; width];
        for (decision, influence) in &decisions {
            let weight = if weighted { *influence } else { 1.0 };
            for (acc, value) in collective.iter_mut().zip(decision) {
                *acc += weight * value;
            }
        }
        let norm = if weighted {
            total_weight
        } else {
            decisions.len() as f64
        };
        collective.iter_mut().for_each(|v| *v /= norm);

        debug!(
            "Décision collective de {} agents en {}ms",
            decisions.len(),
            timer.elapsed().as_millis()
        );
        Ok(collective)
    }

    /// Nombre de composantes connexes (un agent isolé compte pour une).
    pub fn connected_components(&self) -> usize {
        let index: HashMap<&str, usize> = self
            .agents
            .keys()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        let mut parent: Vec<usize> = (0..index.len()).collect();

        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }

        for (a, b) in self.edges.keys() {
            if let (Some(&ia), Some(&ib)) = (index.get(a.as_str()), index.get(b.as_str())) {
                let (ra, rb) = (find(&mut parent, ia), find(&mut parent, ib));
                if ra != rb {
                    parent[ra] = rb;
                }
            }
        }
        (0..parent.len()).filter(|&i| find(&mut parent, i) == i).count()
    }

    /// Agrégation pure sur l'état courant.
    pub fn get_society_stats(&self) -> SocietyStats {
        SocietyStats::collect(self)
    }
}
