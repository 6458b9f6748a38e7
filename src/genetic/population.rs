//! Population bookkeeping and the per-generation evolution step.

use super::config::GeneticConfig;
use super::individual::{crossover, mutate, Weights};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A weight vector and the fitness it earned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub weights: Weights,
    pub fitness: f64,
}

impl Individual {
    pub fn new(weights: Weights) -> Self {
        Self {
            weights,
            fitness: 0.0,
        }
    }
}

/// One row of the append-only statistics log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: u32,
    pub best_fitness: f64,
    pub mean_fitness: f64,
}

#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
    generation: u32,
    best: Option<Individual>,
    stats: Vec<GenerationStats>,
    elite_size: usize,
    tournament_size: usize,
    mutation_rate: f64,
    mutation_magnitude: f64,
}

fn by_fitness_desc(a: &Individual, b: &Individual) -> Ordering {
    b.fitness.total_cmp(&a.fitness)
}

impl Population {
    /// Random initial population sized by `config`.
    pub fn new<R: Rng + ?Sized>(config: &GeneticConfig, rng: &mut R) -> Self {
        let individuals = (0..config.population_size)
            .map(|_| Individual::new(Weights::random(rng)))
            .collect();
        Self::from_individuals(config, individuals)
    }

    pub fn from_individuals(config: &GeneticConfig, individuals: Vec<Individual>) -> Self {
        Self {
            individuals,
            generation: 0,
            best: None,
            stats: Vec::new(),
            elite_size: config.elite_size(),
            tournament_size: config.tournament_size,
            mutation_rate: config.mutation_rate,
            mutation_magnitude: config.mutation_magnitude,
        }
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Best individual seen in any generation, as an owned copy.
    pub fn best(&self) -> Option<&Individual> {
        self.best.as_ref()
    }

    pub fn stats(&self) -> &[GenerationStats] {
        &self.stats
    }

    pub fn elite_size(&self) -> usize {
        self.elite_size
    }

    /// Store evaluation results; `fitness[i]` belongs to individual `i`.
    pub fn assign_fitness(&mut self, fitness: &[f64]) {
        for (individual, &value) in self.individuals.iter_mut().zip(fitness) {
            individual.fitness = value;
        }
    }

    /// Fittest of `tournament_size` members sampled without replacement.
    fn tournament_select<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Individual> {
        let k = self.tournament_size.min(self.individuals.len());
        self.individuals
            .choose_multiple(rng, k)
            .min_by(|a, b| by_fitness_desc(a, b))
    }

    /// Replace the population with the next generation.
    ///
    /// Elites keep their weights and fitness; the rest are bred by
    /// tournament selection, crossover and mutation.
    pub fn evolve<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.individuals.is_empty() {
            return;
        }
        self.individuals.sort_by(by_fitness_desc);

        let leader = self.individuals[0];
        if self.best.map_or(true, |best| leader.fitness > best.fitness) {
            self.best = Some(leader);
        }
        let mean = self.individuals.iter().map(|i| i.fitness).sum::<f64>()
            / self.individuals.len() as f64;
        self.stats.push(GenerationStats {
            generation: self.generation,
            best_fitness: leader.fitness,
            mean_fitness: mean,
        });

        let size = self.individuals.len();
        let mut next: Vec<Individual> = self.individuals[..self.elite_size.min(size)].to_vec();
        while next.len() < size {
            let (Some(a), Some(b)) = (self.tournament_select(rng), self.tournament_select(rng))
            else {
                break;
            };
            let mut child = crossover(&a.weights, &b.weights, rng);
            mutate(&mut child, self.mutation_rate, self.mutation_magnitude, rng);
            next.push(Individual::new(child));
        }

        self.individuals = next;
        self.generation += 1;
    }
}
