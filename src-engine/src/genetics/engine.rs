// FICHIER : src-engine/src/genetics/engine.rs

use super::dto::{EvolutionOutcome, GenerationReport, TerminationReason};
use super::operators::{parallel_crossover, parallel_mutation, SelectionStrategy, TournamentSelection};
use super::traits::{checked_evaluate, FitnessEvaluator};
use super::types::{EvolutionParams, Genome, Population};
use crate::utils::config::DEFAULT_MUTATION_STRENGTH;
use crate::utils::{prelude::*, Arc, Instant};
use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// Étapes d'un cycle : `Idle -> Evaluating -> Selecting -> Reproducing -> Idle`,
/// puis `Terminated` en fin de `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Idle,
    Evaluating,
    Selecting,
    Reproducing,
    Terminated,
}

/// Orchestrateur des opérateurs génétiques sur une population.
pub struct GeneticEngine {
    params: EvolutionParams,
    mutation_strength: f64,
    selection: TournamentSelection,
    state: EngineState,
    generation: u64,
    evaluations: AtomicU64,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl GeneticEngine {
    pub fn new(params: EvolutionParams) -> Result<Self> {
        let pool = match params.parallel_threads() {
            Some(threads) => Some(Arc::new(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("lore-genetics-{}", i))
                    .build()
                    .map_err(|e| AppError::System(anyhow::anyhow!(e)))?,
            )),
            None => None,
        };

        info!(
            "GeneticEngine initialisé (population {}, élitisme {}, tournoi {}, threads {:?})",
            params.population_size(),
            params.elitism_count(),
            params.tournament_size(),
            params.parallel_threads()
        );

        Ok(Self {
            selection: TournamentSelection::new(params.tournament_size()),
            params,
            mutation_strength: DEFAULT_MUTATION_STRENGTH,
            state: EngineState::Idle,
            generation: 0,
            evaluations: AtomicU64::new(0),
            pool,
        })
    }

    /// Construit le moteur depuis la configuration applicative.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.evolution.clone())?.with_mutation_strength(config.mutation_strength)
    }

    pub fn with_mutation_strength(mut self, strength: f64) -> Result<Self> {
        if !strength.is_finite() || strength < 0.0 {
            return Err(AppError::Validation(format!(
                "mutation_strength doit être fini et >= 0, reçu {}",
                strength
            )));
        }
        self.mutation_strength = strength;
        Ok(self)
    }

    pub fn params(&self) -> &EvolutionParams {
        &self.params
    }

    pub fn mutation_strength(&self) -> f64 {
        self.mutation_strength
    }

    /// Nombre de générations produites par ce moteur.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Nombre total d'appels à l'évaluateur.
    pub fn evaluations(&self) -> u64 {
        self.evaluations.load(AtomicOrdering::Relaxed)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Exécute `op` dans le pool dédié si `parallel_threads` est configuré.
    fn install<T, F>(&self, op: F) -> T
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Évalue en parallèle les génomes sans fitness. Renvoie une nouvelle population :
    /// en cas d'échec de l'évaluateur, rien n'est écrit.
    pub fn evaluate_population(
        &self,
        population: &Population,
        evaluator: &dyn FitnessEvaluator,
    ) -> Result<Population> {
        let timer = Instant::now();
        let scores: Vec<Option<f64>> = self.install(|| {
            population
                .genomes
                .par_iter()
                .map(|genome| match genome.fitness {
                    Some(_) => Ok(None),
                    None => checked_evaluate(evaluator, &genome.genes).map(Some),
                })
                .collect::<Result<Vec<_>>>()
        })?;

        let mut evaluated = population.clone();
        let mut calls = 0;
        for (genome, score) in evaluated.genomes.iter_mut().zip(scores) {
            if let Some(fitness) = score {
                genome.set_fitness(fitness);
                calls += 1;
            }
        }
        self.evaluations.fetch_add(calls, AtomicOrdering::Relaxed);

        debug!(
            "{} évaluations ({}) en {}ms",
            calls,
            evaluator.name(),
            timer.elapsed().as_millis()
        );
        Ok(evaluated)
    }

    /// Une génération complète : évaluation, classement, élitisme, reproduction.
    ///
    /// La population d'entrée n'est jamais modifiée ; en cas d'erreur le compteur
    /// de générations reste inchangé et le moteur revient à l'état `Idle`.
    #[instrument(skip_all, fields(generation = population.generation))]
    pub fn evolve_generation(
        &mut self,
        population: &Population,
        evaluator: &dyn FitnessEvaluator,
        rng: &mut dyn RngCore,
    ) -> Result<Population> {
        match self.try_evolve_generation(population, evaluator, rng) {
            Ok(next) => {
                self.generation += 1;
                self.state = EngineState::Idle;
                Ok(next)
            }
            Err(e) => {
                self.state = EngineState::Idle;
                warn!("Génération {} abandonnée : {}", population.generation, e);
                Err(e)
            }
        }
    }

    fn try_evolve_generation(
        &mut self,
        population: &Population,
        evaluator: &dyn FitnessEvaluator,
        rng: &mut dyn RngCore,
    ) -> Result<Population> {
        population.ensure_uniform()?;

        // 1. Évaluation parallèle
        self.state = EngineState::Evaluating;
        let evaluated = self.evaluate_population(population, evaluator)?;

        // 2. Classement + élites
        self.state = EngineState::Selecting;
        let target_size = self.params.population_size();
        let ranked = evaluated.ranked()?;
        let mut next: Vec<Genome> = ranked
            .iter()
            .take(self.params.elitism_count().min(target_size))
            .map(|g| (*g).clone())
            .collect();

        // Parents tirés séquentiellement (dépend d'une population entièrement évaluée)
        let needed = target_size - next.len();
        let pairs = needed.div_ceil(2);
        let mut parents_a = Vec::with_capacity(pairs);
        let mut parents_b = Vec::with_capacity(pairs);
        for _ in 0..pairs {
            parents_a.push(self.selection.select(rng, &evaluated.genomes)?.clone());
            parents_b.push(self.selection.select(rng, &evaluated.genomes)?.clone());
        }

        // 3. Reproduction parallèle (croisement puis mutation)
        self.state = EngineState::Reproducing;
        let mut stage_rng = StdRng::seed_from_u64(rng.next_u64());
        let crossover_rate = self.params.crossover_rate();
        let mutation_rate = self.params.mutation_rate();
        let strength = self.mutation_strength;

        let mut offspring = self.install(move || -> Result<Vec<Genome>> {
            let children =
                parallel_crossover(&parents_a, &parents_b, crossover_rate, &mut stage_rng)?;
            parallel_mutation(&children, mutation_rate, strength, &mut stage_rng)
        })?;
        // Le dernier croisement peut produire un enfant de trop
        offspring.truncate(needed);
        next.extend(offspring);

        Ok(Population::new(next, evaluated.generation + 1))
    }

    /// Boucle complète jusqu'à `max_generations` ou `target_fitness`.
    pub fn run(
        &mut self,
        initial: Population,
        evaluator: &dyn FitnessEvaluator,
        rng: &mut dyn RngCore,
    ) -> Result<EvolutionOutcome> {
        self.run_with(initial, evaluator, rng, |_| {})
    }

    /// Comme `run`, avec un rappel appelé sur chaque rapport de génération.
    pub fn run_with<F>(
        &mut self,
        initial: Population,
        evaluator: &dyn FitnessEvaluator,
        rng: &mut dyn RngCore,
        mut on_generation: F,
    ) -> Result<EvolutionOutcome>
    where
        F: FnMut(&GenerationReport),
    {
        let run_timer = Instant::now();
        let start_generation = self.generation;
        let max_generations = self.params.max_generations();
        let mut reports: Vec<GenerationReport> = Vec::new();
        let mut current = initial;
        self.state = EngineState::Idle;

        info!(
            "Démarrage de l'évolution : {} génomes, {} générations max, évaluateur '{}'",
            current.len(),
            max_generations,
            evaluator.name()
        );

        let termination = loop {
            let timer = Instant::now();
            self.state = EngineState::Evaluating;
            let evaluated = match self.evaluate_population(&current, evaluator) {
                Ok(pop) => pop,
                Err(e) => {
                    self.state = EngineState::Idle;
                    return Err(e);
                }
            };

            let stats = evaluated.stats();
            let report = GenerationReport::from_stats(
                &evaluated,
                &stats,
                reports.last().map(|r| r.best_fitness),
                self.evaluations(),
                timer.elapsed().as_millis() as u64,
            );
            info!(
                "Génération {} : best={:.6} mean={:.6} std={:.6} diversité={:.4}",
                report.generation,
                report.best_fitness,
                report.mean_fitness,
                report.fitness_std,
                report.diversity_index
            );
            on_generation(&report);
            let best_fitness = report.best_fitness;
            reports.push(report);
            current = evaluated;

            if let Some(target) = self.params.target_fitness() {
                if best_fitness >= target {
                    break TerminationReason::TargetReached;
                }
            }
            if self.generation - start_generation >= max_generations {
                break TerminationReason::MaxGenerations;
            }

            current = self.evolve_generation(&current, evaluator, rng)?;
        };

        self.state = EngineState::Terminated;
        info!(
            "Évolution terminée ({:?}) après {} générations",
            termination,
            self.generation - start_generation
        );

        Ok(EvolutionOutcome {
            best: current.best().cloned(),
            reports,
            termination,
            population: current,
            total_evaluations: self.evaluations(),
            duration_ms: run_timer.elapsed().as_millis() as u64,
        })
    }
}
