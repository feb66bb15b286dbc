// FICHIER : src-engine/src/agents/agent.rs

use super::behavior::BehaviorType;
use super::cognitive::{CognitiveState, ExperienceKind};
use crate::genetics::types::Genome;
use crate::neural::activation::ActivationFunction;
use crate::neural::network::NeuralNetwork;
use crate::utils::{prelude::*, BTreeMap, HashMap};
use rand::RngCore;

/// Expérience nécessaire pour gagner un niveau.
pub const XP_PER_LEVEL: u64 = 1000;

/// Agent intelligent : génome + comportement + profil cognitif + cerveau optionnel.
///
/// Le cerveau n'est jamais partagé : cloner un agent clone les poids du réseau.
#[derive(Debug, Clone, Serialize)]
pub struct IntelligentAgent {
    id: String,
    genome: Genome,
    behavior: BehaviorType,
    cognition: CognitiveState,
    brain: Option<NeuralNetwork>,
    experience_points: u64,
    age: u64,
    // Sans éviction : la croissance est de la responsabilité de l'appelant
    memory: HashMap<String, f64>,
    experience_by_category: BTreeMap<String, u64>,
    /// Maintenu par la société, jamais par l'agent lui-même.
    social_connections: usize,
}

/// Photographie de l'état d'un agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentStats {
    pub id: String,
    pub behavior: BehaviorType,
    pub level: u64,
    pub experience_points: u64,
    pub age: u64,
    pub cognitive_capacity: f64,
    pub social_connections: usize,
    pub memory_size: usize,
    pub has_brain: bool,
    pub fitness: Option<f64>,
}

impl IntelligentAgent {
    pub fn new(
        id: impl Into<String>,
        genome: Genome,
        behavior: BehaviorType,
        cognition: CognitiveState,
    ) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(AppError::Validation("identifiant d'agent vide".to_string()));
        }
        if genome.gene_count() == 0 {
            return Err(AppError::Validation(format!(
                "l'agent {} a un génome vide",
                id
            )));
        }
        Ok(Self {
            id,
            genome,
            behavior,
            cognition,
            brain: None,
            experience_points: 0,
            age: 0,
            memory: HashMap::new(),
            experience_by_category: BTreeMap::new(),
            social_connections: 0,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    pub fn behavior(&self) -> BehaviorType {
        self.behavior
    }

    pub fn cognition(&self) -> &CognitiveState {
        &self.cognition
    }

    /// Une expérience fait évoluer le profil cognitif (bornée à ±0.1 par appel).
    pub fn adapt(&mut self, kind: ExperienceKind, intensity: f64) {
        self.cognition.adjust(kind, intensity);
    }

    pub fn brain(&self) -> Option<&NeuralNetwork> {
        self.brain.as_ref()
    }

    pub fn has_brain(&self) -> bool {
        self.brain.is_some()
    }

    pub fn set_brain(&mut self, network: NeuralNetwork) {
        self.brain = Some(network);
    }

    pub fn experience_points(&self) -> u64 {
        self.experience_points
    }

    pub fn level(&self) -> u64 {
        self.experience_points / XP_PER_LEVEL
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    /// Avance l'horloge de simulation de l'agent.
    pub fn tick(&mut self) {
        self.age += 1;
    }

    pub fn social_connections(&self) -> usize {
        self.social_connections
    }

    pub(crate) fn set_social_connections(&mut self, count: usize) {
        self.social_connections = count;
    }

    /// Taille d'entrée attendue par `make_decision`.
    pub fn expected_input_size(&self) -> usize {
        match &self.brain {
            Some(brain) => brain.input_size(),
            None => self.genome.gene_count(),
        }
    }

    /// Décision face à une situation : propagation dans le cerveau s'il existe,
    /// sinon pondération propre à l'archétype.
    pub fn make_decision(&self, situation: &[f64]) -> Result<Vec<f64>> {
        let expected = self.expected_input_size();
        if situation.len() != expected {
            return Err(AppError::dimension(
                format!("situation de l'agent {}", self.id),
                expected,
                situation.len(),
            ));
        }

        match &self.brain {
            Some(brain) => brain.forward(situation),
            None => Ok(self.behavior.weigh(
                situation,
                &self.genome.genes,
                &self.cognition,
                self.social_connections,
            )),
        }
    }

    /// Ajoute de l'expérience. Renvoie `true` si un seuil de niveau est franchi.
    /// L'expérience s'accumule : rien n'est remis à zéro au passage de niveau.
    pub fn gain_experience(&mut self, points: u64, category: &str) -> bool {
        let before = self.level();
        self.experience_points = self.experience_points.saturating_add(points);
        let slot = self
            .experience_by_category
            .entry(category.to_string())
            .or_insert(0);
        *slot = slot.saturating_add(points);

        let leveled_up = self.level() > before;
        if leveled_up {
            info!(
                "Agent {} passe au niveau {} ({} XP)",
                self.id,
                self.level(),
                self.experience_points
            );
        }
        leveled_up
    }

    pub fn experience_by_category(&self) -> &BTreeMap<String, u64> {
        &self.experience_by_category
    }

    pub fn store_memory(&mut self, key: impl Into<String>, value: f64) {
        self.memory.insert(key.into(), value);
    }

    pub fn get_memory(&self, key: &str) -> Option<f64> {
        self.memory.get(key).copied()
    }

    pub fn memory_len(&self) -> usize {
        self.memory.len()
    }

    pub fn stats(&self) -> AgentStats {
        AgentStats {
            id: self.id.clone(),
            behavior: self.behavior,
            level: self.level(),
            experience_points: self.experience_points,
            age: self.age,
            cognitive_capacity: self.cognition.capacity(),
            social_connections: self.social_connections,
            memory_size: self.memory.len(),
            has_brain: self.has_brain(),
            fitness: self.genome.fitness,
        }
    }
}

/// Agent dont le profil cognitif est dérivé du génome et doté d'un cerveau ReLU
/// d'architecture `architecture` (entrée comprise).
pub fn create_agent_with_neural_brain(
    id: impl Into<String>,
    genome: Genome,
    behavior: BehaviorType,
    architecture: &[usize],
    rng: &mut dyn RngCore,
) -> Result<IntelligentAgent> {
    if architecture.len() < 2 {
        return Err(AppError::Validation(format!(
            "architecture de cerveau invalide : {:?}",
            architecture
        )));
    }
    let cognition = CognitiveState::from_genes(&genome.genes);
    let mut agent = IntelligentAgent::new(id, genome, behavior, cognition)?;

    let activations = vec![ActivationFunction::ReLU; architecture.len() - 1];
    agent.set_brain(NeuralNetwork::new(architecture, &activations, rng)?);
    Ok(agent)
}
