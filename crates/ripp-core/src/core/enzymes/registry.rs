use super::motif::{MotifParseError, parse_motif};
use crate::core::models::enzyme::{
    Enzyme, EnzymeRole, SpacingRule, SpringConstants, WildTypeFlanks,
};
use crate::core::models::residue::{ParseResidueError, parse_sequence};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

const BUILTIN_ENZYMES: &str = include_str!("../../../data/enzymes.toml");

static BUILTIN_REGISTRY: OnceLock<EnzymeRegistry> = OnceLock::new();

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
enum RoleRecord {
    #[default]
    Modifying,
    Protease,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct EnzymeRecord {
    motif: String,
    modification_offset: usize,
    optimal_spacing: Option<i64>,
    insertion_constant: Option<f64>,
    deletion_constant: Option<f64>,
    recognition_site: Option<String>,
    leader_flanks: Option<(String, String)>,
    #[serde(default)]
    role: RoleRecord,
}

/// Read-only table of enzyme definitions keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct EnzymeRegistry {
    enzymes: HashMap<String, Enzyme>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown enzyme '{name}'")]
pub struct UnknownEnzymeError {
    pub name: String,
}

#[derive(Debug, Error)]
pub enum RegistryLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid motif for enzyme '{enzyme}': {source}")]
    Motif {
        enzyme: String,
        source: MotifParseError,
    },
    #[error("Invalid {field} for enzyme '{enzyme}': {source}")]
    InvalidResidue {
        enzyme: String,
        field: &'static str,
        source: ParseResidueError,
    },
    #[error(
        "Modification offset {offset} of enzyme '{enzyme}' lies outside its {motif_len}-residue motif"
    )]
    OffsetOutsideMotif {
        enzyme: String,
        offset: usize,
        motif_len: usize,
    },
    #[error("Enzyme '{enzyme}' defines an optimal spacing but not both spring constants")]
    MissingSpringConstants { enzyme: String },
}

impl EnzymeRegistry {
    pub fn load(path: &Path) -> Result<Self, RegistryLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| RegistryLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RegistryLoadError> {
        Self::parse(content, "<string>")
    }

    /// The enzyme table shipped with the crate, initialised once per process.
    pub fn builtin() -> &'static Self {
        BUILTIN_REGISTRY.get_or_init(|| {
            Self::from_toml_str(BUILTIN_ENZYMES).expect("Embedded enzyme table must be valid")
        })
    }

    fn parse(content: &str, origin: &str) -> Result<Self, RegistryLoadError> {
        let records: HashMap<String, EnzymeRecord> =
            toml::from_str(content).map_err(|e| RegistryLoadError::Toml {
                path: origin.to_string(),
                source: e,
            })?;
        records
            .into_iter()
            .map(|(name, record)| build_enzyme(name, record))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&Enzyme> {
        self.enzymes.get(name)
    }

    /// Looks up an enzyme, failing rather than substituting a default.
    pub fn require(&self, name: &str) -> Result<&Enzyme, UnknownEnzymeError> {
        self.get(name).ok_or_else(|| UnknownEnzymeError {
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.enzymes.contains_key(name)
    }

    /// Enzyme identifiers in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.enzymes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.enzymes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enzymes.is_empty()
    }
}

impl FromIterator<Enzyme> for EnzymeRegistry {
    fn from_iter<I: IntoIterator<Item = Enzyme>>(iter: I) -> Self {
        Self {
            enzymes: iter
                .into_iter()
                .map(|enzyme| (enzyme.name.clone(), enzyme))
                .collect(),
        }
    }
}

fn build_enzyme(name: String, record: EnzymeRecord) -> Result<Enzyme, RegistryLoadError> {
    let motif = parse_motif(&record.motif).map_err(|source| RegistryLoadError::Motif {
        enzyme: name.clone(),
        source,
    })?;

    if record.modification_offset >= motif.positions.len() {
        return Err(RegistryLoadError::OffsetOutsideMotif {
            enzyme: name,
            offset: record.modification_offset,
            motif_len: motif.positions.len(),
        });
    }

    let springs = match (record.insertion_constant, record.deletion_constant) {
        (Some(insertion), Some(deletion)) => Some(SpringConstants {
            insertion,
            deletion,
        }),
        _ => None,
    };
    if record.optimal_spacing.is_some() && springs.is_none() {
        return Err(RegistryLoadError::MissingSpringConstants { enzyme: name });
    }

    let residues = |field: &'static str, text: &str| {
        parse_sequence(text).map_err(|source| RegistryLoadError::InvalidResidue {
            enzyme: name.clone(),
            field,
            source,
        })
    };
    let recognition_site = record
        .recognition_site
        .as_deref()
        .map(|site| residues("recognition site", site))
        .transpose()?;
    let flanks = record
        .leader_flanks
        .as_ref()
        .map(|(pre, post)| -> Result<_, RegistryLoadError> {
            Ok(WildTypeFlanks {
                pre_site: residues("leader flank", pre)?,
                post_site: residues("leader flank", post)?,
            })
        })
        .transpose()?;

    Ok(Enzyme {
        name,
        motif: motif.positions,
        anchor: motif.anchor,
        role: match record.role {
            RoleRecord::Modifying => EnzymeRole::Modifying,
            RoleRecord::Protease => EnzymeRole::Protease,
        },
        spacing: SpacingRule {
            optimal_distance: record.optimal_spacing,
            modification_offset: record.modification_offset,
            springs,
        },
        recognition_site,
        flanks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::enzyme::MotifAnchor;
    use crate::core::models::residue::ResidueSet;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL: &str = r#"
        [lynd]
        motif = "[LIMV][C][SNT]"
        modification-offset = 1
        optimal-spacing = 8
        insertion-constant = 10.0
        deletion-constant = 300.0
        recognition-site = "LAELSEEAL"
        leader-flanks = ["NKK", "GGV"]

        [padek]
        motif = "[HY][YL][D][S]$"
        modification-offset = 3
    "#;

    #[test]
    fn builtin_registry_contains_all_ten_enzymes() {
        let registry = EnzymeRegistry::builtin();
        assert_eq!(
            registry.names(),
            vec![
                "epid", "lasf", "lynd", "paap", "padek", "pals", "plpxy", "tevp", "tgnb", "thcok"
            ]
        );
    }

    #[test]
    fn builtin_registry_is_initialised_once() {
        assert!(std::ptr::eq(
            EnzymeRegistry::builtin(),
            EnzymeRegistry::builtin()
        ));
    }

    #[test]
    fn builtin_padek_is_end_anchored_with_four_positions() {
        let padek = EnzymeRegistry::builtin().require("padek").unwrap();
        assert_eq!(padek.anchor, MotifAnchor::End);
        assert_eq!(padek.motif.len(), 4);
        assert_eq!(padek.motif[2], ResidueSet::from_codes("D").unwrap());
        assert_eq!(padek.spacing.modification_offset, 3);
        assert!(padek.tiling_parameters().is_none());
    }

    #[test]
    fn builtin_tevp_is_the_protease() {
        let registry = EnzymeRegistry::builtin();
        let tevp = registry.require("tevp").unwrap();
        assert!(tevp.is_protease());
        assert!(!registry.require("lynd").unwrap().is_protease());
        let (optimal, springs) = tevp.tiling_parameters().unwrap();
        assert_eq!(optimal, 0);
        assert_eq!(springs.insertion, 1e9);
    }

    #[test]
    fn require_fails_for_unknown_enzyme() {
        let err = EnzymeRegistry::builtin().require("nisb").unwrap_err();
        assert_eq!(err.name, "nisb");
    }

    #[test]
    fn from_toml_str_parses_optional_fields() {
        let registry = EnzymeRegistry::from_toml_str(MINIMAL).unwrap();
        assert_eq!(registry.len(), 2);

        let lynd = registry.require("lynd").unwrap();
        assert_eq!(lynd.recognition_site.as_ref().unwrap().len(), 9);
        assert_eq!(lynd.flanks.as_ref().unwrap().post_site.len(), 3);

        let padek = registry.require("padek").unwrap();
        assert!(padek.recognition_site.is_none());
        assert!(padek.flanks.is_none());
        assert_eq!(padek.role, EnzymeRole::Modifying);
    }

    #[test]
    fn load_reads_registry_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", MINIMAL).unwrap();
        let registry = EnzymeRegistry::load(file.path()).unwrap();
        assert!(registry.contains("lynd"));
        assert!(registry.contains("padek"));
    }

    #[test]
    fn load_reports_missing_file() {
        let result = EnzymeRegistry::load(Path::new("/nonexistent/enzymes.toml"));
        assert!(matches!(result, Err(RegistryLoadError::Io { .. })));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let content = r#"
            [x1]
            motif = "[A]"
            modification-offset = 0
            colour = "blue"
        "#;
        assert!(matches!(
            EnzymeRegistry::from_toml_str(content),
            Err(RegistryLoadError::Toml { .. })
        ));
    }

    #[test]
    fn offset_outside_motif_is_rejected() {
        let content = r#"
            [x1]
            motif = "[A][C]"
            modification-offset = 2
        "#;
        assert!(matches!(
            EnzymeRegistry::from_toml_str(content),
            Err(RegistryLoadError::OffsetOutsideMotif { offset: 2, motif_len: 2, .. })
        ));
    }

    #[test]
    fn optimal_spacing_without_springs_is_rejected() {
        let content = r#"
            [x1]
            motif = "[A]"
            modification-offset = 0
            optimal-spacing = 4
            insertion-constant = 1.0
        "#;
        assert!(matches!(
            EnzymeRegistry::from_toml_str(content),
            Err(RegistryLoadError::MissingSpringConstants { .. })
        ));
    }

    #[test]
    fn invalid_recognition_site_names_the_field() {
        let content = r#"
            [x1]
            motif = "[A]"
            modification-offset = 0
            recognition-site = "ENxQ"
        "#;
        match EnzymeRegistry::from_toml_str(content) {
            Err(RegistryLoadError::InvalidResidue { enzyme, field, .. }) => {
                assert_eq!(enzyme, "x1");
                assert_eq!(field, "recognition site");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn invalid_motif_names_the_enzyme() {
        let content = r#"
            [x1]
            motif = "[A"
            modification-offset = 0
        "#;
        assert!(matches!(
            EnzymeRegistry::from_toml_str(content),
            Err(RegistryLoadError::Motif { enzyme, .. }) if enzyme == "x1"
        ));
    }
}
