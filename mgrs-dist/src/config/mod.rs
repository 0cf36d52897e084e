//! Configuration de l'affichage des distances
//!
//! Ordre de priorité : options CLI > fichier JSON > variables d'environnement > défauts.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Unité d'affichage des distances
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    /// Kilomètres (défaut)
    #[default]
    #[serde(alias = "km")]
    #[value(alias = "km")]
    Kilometers,
    /// Mètres
    #[serde(alias = "m")]
    #[value(alias = "m")]
    Meters,
}

impl DistanceUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Kilometers => "km",
            Self::Meters => "m",
        }
    }

    /// Convertit une distance en mètres vers cette unité
    pub fn from_meters(self, meters: f64) -> f64 {
        match self {
            Self::Kilometers => meters / 1000.0,
            Self::Meters => meters,
        }
    }
}

impl std::str::FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "km" | "kilometers" | "kilometres" => Ok(Self::Kilometers),
            "m" | "meters" | "metres" => Ok(Self::Meters),
            _ => Err(format!("Invalid distance unit: {}. Use: km, m", s)),
        }
    }
}

/// Configuration de sortie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutputConfig {
    /// Unité des distances affichées
    pub unit: DistanceUnit,

    /// Nombre de décimales
    pub decimals: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            unit: DistanceUnit::Kilometers,
            decimals: 3,
        }
    }
}

/// Contenu d'un fichier de configuration (toutes les clés sont optionnelles)
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub unit: Option<DistanceUnit>,
    pub decimals: Option<u8>,
}

impl ConfigFile {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }
}

impl OutputConfig {
    /// Charge la configuration depuis les variables d'environnement
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Variante de [`Self::from_env`] avec une source de variables arbitraire
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            unit: lookup("MGRS_DIST_UNIT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.unit),
            decimals: lookup("MGRS_DIST_DECIMALS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.decimals),
        }
    }

    /// Applique les valeurs d'un fichier de configuration
    pub fn merge_file(&mut self, file: &ConfigFile) {
        if let Some(unit) = file.unit {
            self.unit = unit;
        }
        if let Some(decimals) = file.decimals {
            self.decimals = decimals;
        }
    }

    /// Applique les options de la ligne de commande
    pub fn apply_overrides(&mut self, unit: Option<DistanceUnit>, decimals: Option<u8>) {
        if let Some(unit) = unit {
            self.unit = unit;
        }
        if let Some(decimals) = decimals {
            self.decimals = decimals;
        }
    }

    /// Construit la configuration finale (env, puis fichier, puis CLI)
    pub fn resolve(
        config_path: Option<&Path>,
        unit: Option<DistanceUnit>,
        decimals: Option<u8>,
    ) -> Result<Self> {
        let mut config = Self::from_env();
        if let Some(path) = config_path {
            config.merge_file(&ConfigFile::load(path)?);
        }
        config.apply_overrides(unit, decimals);
        Ok(config)
    }

    /// Formate une distance en mètres, ex. "41.956 km"
    pub fn format_distance(&self, meters: f64) -> String {
        format!(
            "{:.*} {}",
            usize::from(self.decimals),
            self.unit.from_meters(meters),
            self.unit.symbol()
        )
    }
}
