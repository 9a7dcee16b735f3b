//! Facility topology: the static catalog of blocks, floors and sectors
//!
//! The topology is fixed at configuration time and read once to seed the
//! registry. It is represented as ordered lists so that enumeration order
//! is the document order of the YAML catalog.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Identity of a single sector. Names are unique within a floor, not
/// globally, so identity always requires the full triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectorId {
    pub block: String,
    pub floor: String,
    pub name: String,
}

impl SectorId {
    pub fn new(block: impl Into<String>, floor: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            block: block.into(),
            floor: floor.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for SectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.block, self.floor, self.name)
    }
}

/// A floor within a block, holding an ordered list of sector names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Floor {
    pub name: String,
    pub sectors: Vec<String>,
}

/// A top-level physical division of the facility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub name: String,
    pub floors: Vec<Floor>,
}

/// The full facility catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    pub blocks: Vec<Block>,
}

impl Topology {
    /// Parse a topology from its YAML representation
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse topology YAML")
    }

    /// The hospital catalog compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::from_yaml(EMBEDDED_TOPOLOGY)
    }

    /// Load a topology from a file, falling back to the embedded catalog
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .context(format!("Failed to read topology file: {}", path.display()))?;
                let topology = Self::from_yaml(&content)?;
                debug!(path = %path.display(), sectors = topology.sector_count(), "Loaded topology file");
                Ok(topology)
            }
            None => Self::embedded(),
        }
    }

    /// Enumerate all sector identities in catalog order
    pub fn ids(&self) -> impl Iterator<Item = SectorId> + '_ {
        self.blocks.iter().flat_map(|block| {
            block.floors.iter().flat_map(move |floor| {
                floor
                    .sectors
                    .iter()
                    .map(move |name| SectorId::new(&block.name, &floor.name, name))
            })
        })
    }

    /// Check whether a triple is part of the catalog
    pub fn contains(&self, id: &SectorId) -> bool {
        self.blocks.iter().any(|block| {
            block.name == id.block
                && block.floors.iter().any(|floor| {
                    floor.name == id.floor && floor.sectors.iter().any(|name| *name == id.name)
                })
        })
    }

    /// Names of all blocks, in catalog order
    pub fn block_names(&self) -> Vec<&str> {
        self.blocks.iter().map(|b| b.name.as_str()).collect()
    }

    /// Total number of sectors in the catalog
    pub fn sector_count(&self) -> usize {
        self.blocks
            .iter()
            .flat_map(|b| &b.floors)
            .map(|f| f.sectors.len())
            .sum()
    }
}

/// Default hospital catalog, used when no topology file is configured
const EMBEDDED_TOPOLOGY: &str = r#"
blocks:
  - name: BLOCO A
    floors:
      - name: Térreo
        sectors: [Consultórios, Laboratório de Marcha, Posto de Enfermagem, Odontologia, Elevadores e Rampas]
      - name: 1º Pavimento
        sectors: [UTI]
      - name: 2º Pavimento
        sectors: [Enfermaria Clínica, Quarto de Plantão, Rouparia, Elevadores e Rampas]
      - name: 3º Pavimento
        sectors: [Centro Cirúrgico, RPA, CME, Elevadores e Rampas]
      - name: 4º Pavimento
        sectors: [Maternidade, Centro Obstétrico, Berçário, Alojamento Conjunto, Elevadores e Rampas]
  - name: BLOCO B
    floors:
      - name: Térreo
        sectors: [Recepção, Farmácia, Laboratório, Radiologia, Tomografia, Ultrassom, Elevadores e Escadas]
      - name: 1º Pavimento
        sectors: [Administração, RH, Financeiro, Diretoria, Sala de Reuniões, Elevadores e Escadas]
      - name: 2º Pavimento
        sectors: [Pediatria, UTI Pediátrica, Brinquedoteca, Elevadores e Escadas]
      - name: 3º Pavimento
        sectors: [Ortopedia, Fisioterapia, Terapia Ocupacional, Elevadores e Escadas]
  - name: BLOCO C
    floors:
      - name: Térreo
        sectors: [Emergência, Pronto Socorro, Triagem, Observação, Medicação, Elevadores e Escadas]
      - name: 1º Pavimento
        sectors: [Cardiologia, Neurologia, Oncologia, Elevadores e Escadas]
      - name: 2º Pavimento
        sectors: [Hemodiálise, Quimioterapia, Hospital Dia, Elevadores e Escadas]
  - name: ANEXO
    floors:
      - name: Térreo
        sectors: [Lavanderia, Cozinha, Refeitório, Almoxarifado, Manutenção]
      - name: 1º Pavimento
        sectors: [Auditório, Biblioteca, Sala de Treinamento, Vestiários]
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_topology_parses() {
        let topology = Topology::embedded().unwrap();
        assert_eq!(topology.blocks.len(), 4);
        assert_eq!(topology.block_names(), vec!["BLOCO A", "BLOCO B", "BLOCO C", "ANEXO"]);
        assert!(topology.sector_count() > 50);
    }

    #[test]
    fn test_contains() {
        let topology = Topology::embedded().unwrap();
        assert!(topology.contains(&SectorId::new("BLOCO A", "1º Pavimento", "UTI")));
        assert!(topology.contains(&SectorId::new("ANEXO", "Térreo", "Cozinha")));
        assert!(!topology.contains(&SectorId::new("BLOCO A", "1º Pavimento", "Cozinha")));
        assert!(!topology.contains(&SectorId::new("BLOCO Z", "Térreo", "UTI")));
    }

    #[test]
    fn test_ids_follow_catalog_order() {
        let topology = Topology::embedded().unwrap();
        let ids: Vec<SectorId> = topology.ids().collect();
        assert_eq!(ids.len(), topology.sector_count());
        assert_eq!(ids[0], SectorId::new("BLOCO A", "Térreo", "Consultórios"));
        assert_eq!(ids.last().unwrap(), &SectorId::new("ANEXO", "1º Pavimento", "Vestiários"));
    }

    #[test]
    fn test_yaml_round_trip_keeps_order() {
        let topology = Topology::embedded().unwrap();
        let yaml = serde_yaml::to_string(&topology).unwrap();
        let reparsed = Topology::from_yaml(&yaml).unwrap();
        let before: Vec<SectorId> = topology.ids().collect();
        let after: Vec<SectorId> = reparsed.ids().collect();
        assert_eq!(before, after);
    }
}
