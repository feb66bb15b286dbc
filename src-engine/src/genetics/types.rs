// FICHIER : src-engine/src/genetics/types.rs

use crate::utils::{prelude::*, Ordering};
use rand::RngCore;
use std::convert::TryFrom;

/// Nombre maximal de gènes par génome.
pub const MAX_GENE_COUNT: usize = 10_000;

/// Bornes de l'espace génétique.
pub const GENE_MIN: f64 = -1.0;
pub const GENE_MAX: f64 = 1.0;

/// Génère un identifiant reproductible à partir d'une source aléatoire explicite.
pub fn random_id(rng: &mut dyn RngCore) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

// =========================================================================
// GÉNOME
// =========================================================================

/// Vecteur de gènes réels de longueur fixe + métadonnées de fitness et de lignée.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Genome {
    id: Uuid,
    pub genes: Vec<f64>,
    /// `None` tant qu'aucun évaluateur n'est passé.
    pub fitness: Option<f64>,
    pub generation: u64,
    /// Nombre d'appels de mutation ayant effectivement modifié au moins un gène.
    pub mutation_count: u64,
    pub parent_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Genome {
    pub fn new(genes: Vec<f64>) -> Self {
        Self::with_id(Uuid::new_v4(), genes)
    }

    /// Variante déterministe : l'identifiant est tiré de `rng`.
    pub fn new_seeded(genes: Vec<f64>, rng: &mut dyn RngCore) -> Self {
        Self::with_id(random_id(rng), genes)
    }

    fn with_id(id: Uuid, genes: Vec<f64>) -> Self {
        Self {
            id,
            genes,
            fitness: None,
            generation: 0,
            mutation_count: 0,
            parent_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Enfant issu de reproduction : fitness effacée, lignée renseignée.
    pub(crate) fn offspring(
        genes: Vec<f64>,
        generation: u64,
        parent_ids: Vec<Uuid>,
        rng: &mut dyn RngCore,
    ) -> Self {
        let mut child = Self::new_seeded(genes, rng);
        child.generation = generation;
        child.parent_ids = parent_ids;
        child
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn gene_count(&self) -> usize {
        self.genes.len()
    }

    pub fn has_fitness(&self) -> bool {
        self.fitness.is_some()
    }

    pub fn fitness_or(&self, default: f64) -> f64 {
        self.fitness.unwrap_or(default)
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Copie conforme (gènes, fitness, lignée) sous un nouvel identifiant v4.
    pub fn clone_with_new_id(&self) -> Self {
        let mut clone = self.clone();
        clone.id = Uuid::new_v4();
        clone
    }

    /// Comme `clone_with_new_id`, mais avec un identifiant reproductible.
    pub fn clone_with_id_from(&self, rng: &mut dyn RngCore) -> Self {
        let mut clone = self.clone();
        clone.id = random_id(rng);
        clone
    }

    /// Distance euclidienne entre deux génomes de même longueur.
    pub fn distance(&self, other: &Genome) -> Result<f64> {
        if self.genes.len() != other.genes.len() {
            return Err(AppError::dimension(
                "distance génétique",
                self.genes.len(),
                other.genes.len(),
            ));
        }
        Ok(self
            .genes
            .iter()
            .zip(other.genes.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt())
    }

    /// Similarité dans [0, 1] : 1 pour des génomes identiques, tend vers 0 avec la distance.
    pub fn similarity(&self, other: &Genome) -> Result<f64> {
        Ok(1.0 / (1.0 + self.distance(other)?))
    }
}

/// Ordre de classement : fitness décroissante, puis identifiant croissant.
/// Les génomes non évalués passent après tous les génomes évalués.
pub fn compare_by_fitness(a: &Genome, b: &Genome) -> Ordering {
    match (a.fitness, b.fitness) {
        (Some(fa), Some(fb)) => fb.total_cmp(&fa).then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    }
}

// =========================================================================
// POPULATION
// =========================================================================

/// Population d'une génération donnée. Remplacée en bloc entre deux générations.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Population {
    pub genomes: Vec<Genome>,
    pub generation: u64,
}

impl Population {
    pub fn new(genomes: Vec<Genome>, generation: u64) -> Self {
        Self {
            genomes,
            generation,
        }
    }

    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    /// Longueur commune des génomes (`None` si la population est vide).
    pub fn gene_count(&self) -> Option<usize> {
        self.genomes.first().map(Genome::gene_count)
    }

    /// Vérifie que tous les génomes partagent la même longueur et la renvoie.
    pub fn ensure_uniform(&self) -> Result<usize> {
        let expected = self.gene_count().ok_or_else(|| {
            AppError::Precondition("population vide".to_string())
        })?;
        for genome in &self.genomes {
            if genome.gene_count() != expected {
                return Err(AppError::dimension(
                    "population",
                    expected,
                    genome.gene_count(),
                ));
            }
        }
        Ok(expected)
    }

    /// Meilleur génome évalué (égalités départagées par l'identifiant le plus bas).
    pub fn best(&self) -> Option<&Genome> {
        self.genomes
            .iter()
            .filter(|g| g.has_fitness())
            .min_by(|a, b| compare_by_fitness(a, b))
    }

    /// Classement complet, du meilleur au moins bon. Exige une population entièrement évaluée.
    pub fn ranked(&self) -> Result<Vec<&Genome>> {
        if let Some(missing) = self.genomes.iter().find(|g| !g.has_fitness()) {
            return Err(AppError::Precondition(format!(
                "classement impossible : le génome {} n'a pas de fitness",
                missing.id()
            )));
        }
        let mut ranked: Vec<&Genome> = self.genomes.iter().collect();
        ranked.sort_by(|a, b| compare_by_fitness(a, b));
        Ok(ranked)
    }

    pub fn stats(&self) -> PopulationStats {
        let fitnesses: Vec<f64> = self.genomes.iter().filter_map(|g| g.fitness).collect();
        let (mean, std) = mean_and_std(&fitnesses);
        let generations: Vec<f64> = self.genomes.iter().map(|g| g.generation as f64).collect();

        PopulationStats {
            size: self.genomes.len(),
            evaluated: fitnesses.len(),
            best: fitnesses.iter().copied().reduce(f64::max),
            worst: fitnesses.iter().copied().reduce(f64::min),
            mean: (!fitnesses.is_empty()).then_some(mean),
            std: (!fitnesses.is_empty()).then_some(std),
            diversity_index: self.diversity_index(),
            mean_generation: mean_and_std(&generations).0,
            max_generation: self.genomes.iter().map(|g| g.generation).max().unwrap_or(0),
        }
    }

    /// Moyenne, sur chaque position de gène, de l'écart-type dans la population.
    pub fn diversity_index(&self) -> f64 {
        let Some(gene_count) = self.gene_count() else {
            return 0.0;
        };
        if gene_count == 0 || self.genomes.len() < 2 {
            return 0.0;
        }
        let total: f64 = (0..gene_count)
            .map(|i| {
                let column: Vec<f64> = self
                    .genomes
                    .iter()
                    .filter_map(|g| g.genes.get(i).copied())
                    .collect();
                mean_and_std(&column).1
            })
            .sum();
        total / gene_count as f64
    }
}

/// Statistiques agrégées d'une population.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PopulationStats {
    pub size: usize,
    pub evaluated: usize,
    pub best: Option<f64>,
    pub worst: Option<f64>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub diversity_index: f64,
    pub mean_generation: f64,
    pub max_generation: u64,
}

/// Moyenne et écart-type (population) ; `(0, 0)` pour une série vide.
/// Sommation séquentielle dans l'ordre de la série.
pub(crate) fn mean_and_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

// =========================================================================
// PARAMÈTRES D'ÉVOLUTION
// =========================================================================

pub const DEFAULT_POPULATION_SIZE: usize = 100;
pub const DEFAULT_MUTATION_RATE: f64 = 0.1;
pub const DEFAULT_CROSSOVER_RATE: f64 = 0.8;
pub const DEFAULT_SELECTION_PRESSURE: f64 = 0.7;
pub const DEFAULT_ELITISM_COUNT: usize = 5;
pub const DEFAULT_MAX_GENERATIONS: u64 = 1000;
pub const DEFAULT_TOURNAMENT_SIZE: usize = 3;

/// Paramètres validés à la construction et immuables ensuite.
/// Aucune instance invalide n'est observable : les champs sont privés et
/// la désérialisation passe par la même validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEvolutionParams", into = "RawEvolutionParams")]
pub struct EvolutionParams {
    population_size: usize,
    mutation_rate: f64,
    crossover_rate: f64,
    selection_pressure: f64,
    elitism_count: usize,
    max_generations: u64,
    tournament_size: usize,
    target_fitness: Option<f64>,
    parallel_threads: Option<usize>,
}

impl EvolutionParams {
    /// Raccourci pour les trois paramètres principaux ; les autres prennent
    /// leur valeur par défaut (élitisme et tournoi bornés par la population).
    pub fn new(population_size: usize, mutation_rate: f64, crossover_rate: f64) -> Result<Self> {
        Self::builder()
            .population_size(population_size)
            .mutation_rate(mutation_rate)
            .crossover_rate(crossover_rate)
            .build()
    }

    pub fn builder() -> EvolutionParamsBuilder {
        EvolutionParamsBuilder::default()
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }
    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }
    pub fn selection_pressure(&self) -> f64 {
        self.selection_pressure
    }
    pub fn elitism_count(&self) -> usize {
        self.elitism_count
    }
    pub fn max_generations(&self) -> u64 {
        self.max_generations
    }
    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }
    pub fn target_fitness(&self) -> Option<f64> {
        self.target_fitness
    }
    pub fn parallel_threads(&self) -> Option<usize> {
        self.parallel_threads
    }

    fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(AppError::Validation(
                "population_size doit être > 0".to_string(),
            ));
        }
        check_rate("mutation_rate", self.mutation_rate)?;
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("selection_pressure", self.selection_pressure)?;
        if self.elitism_count > self.population_size {
            return Err(AppError::Validation(format!(
                "elitism_count ({}) ne peut pas dépasser population_size ({})",
                self.elitism_count, self.population_size
            )));
        }
        if self.max_generations == 0 {
            return Err(AppError::Validation(
                "max_generations doit être > 0".to_string(),
            ));
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(AppError::Validation(format!(
                "tournament_size doit être entre 1 et {}, reçu {}",
                self.population_size, self.tournament_size
            )));
        }
        if let Some(target) = self.target_fitness {
            if !target.is_finite() {
                return Err(AppError::Validation(format!(
                    "target_fitness doit être fini, reçu {}",
                    target
                )));
            }
        }
        if self.parallel_threads == Some(0) {
            return Err(AppError::Validation(
                "parallel_threads doit être > 0".to_string(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn check_rate(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(AppError::Validation(format!(
            "{} doit être dans [0, 1], reçu {}",
            name, value
        )));
    }
    Ok(())
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            mutation_rate: DEFAULT_MUTATION_RATE,
            crossover_rate: DEFAULT_CROSSOVER_RATE,
            selection_pressure: DEFAULT_SELECTION_PRESSURE,
            elitism_count: DEFAULT_ELITISM_COUNT,
            max_generations: DEFAULT_MAX_GENERATIONS,
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
            target_fitness: None,
            parallel_threads: None,
        }
    }
}

/// Constructeur incrémental. `build()` est le seul point de validation.
#[derive(Debug, Clone, Default)]
pub struct EvolutionParamsBuilder {
    population_size: Option<usize>,
    mutation_rate: Option<f64>,
    crossover_rate: Option<f64>,
    selection_pressure: Option<f64>,
    elitism_count: Option<usize>,
    max_generations: Option<u64>,
    tournament_size: Option<usize>,
    target_fitness: Option<f64>,
    parallel_threads: Option<usize>,
}

impl EvolutionParamsBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }
    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }
    pub fn crossover_rate(mut self, value: f64) -> Self {
        self.crossover_rate = Some(value);
        self
    }
    pub fn selection_pressure(mut self, value: f64) -> Self {
        self.selection_pressure = Some(value);
        self
    }
    pub fn elitism_count(mut self, value: usize) -> Self {
        self.elitism_count = Some(value);
        self
    }
    pub fn max_generations(mut self, value: u64) -> Self {
        self.max_generations = Some(value);
        self
    }
    pub fn tournament_size(mut self, value: usize) -> Self {
        self.tournament_size = Some(value);
        self
    }
    pub fn target_fitness(mut self, value: Option<f64>) -> Self {
        self.target_fitness = value;
        self
    }
    pub fn parallel_threads(mut self, value: Option<usize>) -> Self {
        self.parallel_threads = value;
        self
    }

    pub fn build(self) -> Result<EvolutionParams> {
        let population_size = self.population_size.unwrap_or(DEFAULT_POPULATION_SIZE);
        let params = EvolutionParams {
            population_size,
            mutation_rate: self.mutation_rate.unwrap_or(DEFAULT_MUTATION_RATE),
            crossover_rate: self.crossover_rate.unwrap_or(DEFAULT_CROSSOVER_RATE),
            selection_pressure: self
                .selection_pressure
                .unwrap_or(DEFAULT_SELECTION_PRESSURE),
            // Valeurs implicites ramenées à la taille de population
            elitism_count: self
                .elitism_count
                .unwrap_or(DEFAULT_ELITISM_COUNT.min(population_size)),
            max_generations: self.max_generations.unwrap_or(DEFAULT_MAX_GENERATIONS),
            tournament_size: self
                .tournament_size
                .unwrap_or(DEFAULT_TOURNAMENT_SIZE.min(population_size)),
            target_fitness: self.target_fitness,
            parallel_threads: self.parallel_threads,
        };
        params.validate()?;
        Ok(params)
    }
}

/// Forme sérialisée (fichiers de configuration, rapports JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEvolutionParams {
    pub population_size: usize,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub selection_pressure: f64,
    pub elitism_count: usize,
    pub max_generations: u64,
    pub tournament_size: usize,
    pub target_fitness: Option<f64>,
    pub parallel_threads: Option<usize>,
}

impl Default for RawEvolutionParams {
    fn default() -> Self {
        EvolutionParams::default().into()
    }
}

impl From<EvolutionParams> for RawEvolutionParams {
    fn from(p: EvolutionParams) -> Self {
        Self {
            population_size: p.population_size,
            mutation_rate: p.mutation_rate,
            crossover_rate: p.crossover_rate,
            selection_pressure: p.selection_pressure,
            elitism_count: p.elitism_count,
            max_generations: p.max_generations,
            tournament_size: p.tournament_size,
            target_fitness: p.target_fitness,
            parallel_threads: p.parallel_threads,
        }
    }
}

impl TryFrom<RawEvolutionParams> for EvolutionParams {
    type Error = AppError;

    fn try_from(raw: RawEvolutionParams) -> Result<Self> {
        let params = EvolutionParams {
            population_size: raw.population_size,
            mutation_rate: raw.mutation_rate,
            crossover_rate: raw.crossover_rate,
            selection_pressure: raw.selection_pressure,
            elitism_count: raw.elitism_count,
            max_generations: raw.max_generations,
            tournament_size: raw.tournament_size,
            target_fitness: raw.target_fitness,
            parallel_threads: raw.parallel_threads,
        };
        params.validate()?;
        Ok(params)
    }
}
