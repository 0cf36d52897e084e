//! Rapport de calcul par lots
//!
//! Collecte les distances calculées et les erreurs ligne par ligne,
//! pour affichage console ou sauvegarde JSON.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use crate::config::OutputConfig;

/// Statut global du lot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BatchStatus {
    /// Toutes les paires calculées
    Success,
    /// Certaines paires en erreur
    PartialSuccess,
    /// Aucune paire calculée
    Failed,
}

/// Distance calculée pour une paire
#[derive(Debug, Clone, Serialize)]
pub struct PairResult {
    /// Numéro de ligne dans le fichier source (1-based)
    pub line: usize,
    pub from: String,
    pub to: String,
    pub from_lat: f64,
    pub from_lon: f64,
    pub to_lat: f64,
    pub to_lon: f64,
    /// Distance en mètres
    pub distance_m: f64,
}

/// Erreur sur une ligne du lot
#[derive(Debug, Clone, Serialize)]
pub struct PairError {
    /// Numéro de ligne dans le fichier source (1-based)
    pub line: usize,
    /// Contenu brut de la ligne
    pub input: String,
    /// Message d'erreur
    pub message: String,
}

/// Rapport complet d'un lot
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Fichier source
    pub source: String,
    /// Durée du calcul
    pub duration_secs: f64,
    /// Statut global
    pub status: BatchStatus,
    /// Nombre de paires calculées
    pub pairs_computed: usize,
    /// Nombre de lignes en erreur
    pub pairs_failed: usize,
    /// Résultats, dans l'ordre du fichier
    pub results: Vec<PairResult>,
    /// Erreurs, dans l'ordre du fichier
    pub errors: Vec<PairError>,
}

impl BatchReport {
    /// Crée un nouveau rapport pour un fichier source
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            duration_secs: 0.0,
            status: BatchStatus::Success,
            pairs_computed: 0,
            pairs_failed: 0,
            results: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Enregistre une paire calculée
    pub fn record_result(&mut self, result: PairResult) {
        self.pairs_computed += 1;
        self.results.push(result);
    }

    /// Enregistre une ligne en erreur
    pub fn record_error(&mut self, error: PairError) {
        self.pairs_failed += 1;
        self.errors.push(error);
    }

    /// Définit la durée du calcul
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Trie par ligne et détermine le statut final
    pub fn finalize(&mut self) {
        self.results.sort_by_key(|r| r.line);
        self.errors.sort_by_key(|e| e.line);

        self.status = match (self.pairs_computed, self.pairs_failed) {
            (_, 0) => BatchStatus::Success,
            (0, _) => BatchStatus::Failed,
            _ => BatchStatus::PartialSuccess,
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self, output: &OutputConfig) {
        println!("\n{}", "=".repeat(60));
        println!("BATCH REPORT - {}", self.source);
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.2}s", self.duration_secs);
        println!(
            "Pairs: {} computed, {} failed",
            self.pairs_computed, self.pairs_failed
        );

        if !self.results.is_empty() {
            println!("\n--- DISTANCES ---");
            for r in &self.results {
                println!(
                    "  [{}] {} -> {}: {}",
                    r.line,
                    r.from,
                    r.to,
                    output.format_distance(r.distance_m)
                );
            }
        }

        if !self.errors.is_empty() {
            println!("\n--- ERRORS ({}) ---", self.errors.len());
            for e in self.errors.iter().take(20) {
                println!("  [{}] {}: {}", e.line, e.input, e.message);
            }
            if self.errors.len() > 20 {
                println!("  ... and {} more", self.errors.len() - 20);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{}: {} computed, {} failed",
            self.source, self.pairs_computed, self.pairs_failed
        )
    }
}
