use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    /// Every card in the bundle shares one rank.
    Identical,
    /// No constraint. Tracked for display, never drawn from the pool.
    Any,
}

impl RequirementKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            RequirementKind::Identical => "identical",
            RequirementKind::Any => "any",
        }
    }
}

impl fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RequirementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "identical" => Ok(RequirementKind::Identical),
            "any" => Ok(RequirementKind::Any),
            other => Err(format!("unknown requirement kind '{other}'")),
        }
    }
}

/// A bundle component: `count` cards of the given kind. Stored on disk as
/// the pair `[count, "identical"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(u32, RequirementKind)", into = "(u32, RequirementKind)")]
pub struct Requirement {
    pub count: u32,
    pub kind: RequirementKind,
}

impl Requirement {
    pub const fn new(count: u32, kind: RequirementKind) -> Self {
        Self { count, kind }
    }

    pub const fn identical(count: u32) -> Self {
        Self::new(count, RequirementKind::Identical)
    }

    pub const fn any(count: u32) -> Self {
        Self::new(count, RequirementKind::Any)
    }

    pub const fn is_identical(self) -> bool {
        matches!(self.kind, RequirementKind::Identical)
    }
}

impl Default for Requirement {
    fn default() -> Self {
        Self::identical(2)
    }
}

impl From<(u32, RequirementKind)> for Requirement {
    fn from((count, kind): (u32, RequirementKind)) -> Self {
        Self { count, kind }
    }
}

impl From<Requirement> for (u32, RequirementKind) {
    fn from(value: Requirement) -> Self {
        (value.count, value.kind)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} cards", self.count, self.kind)
    }
}

/// Cards one complete set draws from the pool: the sum of identical counts.
pub fn cards_per_set(requirements: &[Requirement]) -> u32 {
    requirements
        .iter()
        .filter(|req| req.is_identical())
        .map(|req| req.count)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::{Requirement, RequirementKind, cards_per_set};

    #[test]
    fn serializes_as_count_kind_pair() {
        let json = serde_json::to_string(&Requirement::identical(4)).unwrap();
        assert_eq!(json, r#"[4,"identical"]"#);
        let parsed: Requirement = serde_json::from_str(r#"[2, "any"]"#).unwrap();
        assert_eq!(parsed, Requirement::any(2));
    }

    #[test]
    fn default_is_identical_pair() {
        assert_eq!(Requirement::default(), Requirement::identical(2));
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!(
            "Identical".parse::<RequirementKind>(),
            Ok(RequirementKind::Identical)
        );
        assert_eq!(" any ".parse::<RequirementKind>(), Ok(RequirementKind::Any));
        assert!("pair".parse::<RequirementKind>().is_err());
    }

    #[test]
    fn any_requirements_do_not_add_to_set_size() {
        let reqs = [
            Requirement::identical(4),
            Requirement::any(3),
            Requirement::identical(2),
        ];
        assert_eq!(cards_per_set(&reqs), 6);
        assert_eq!(cards_per_set(&[Requirement::any(5)]), 0);
    }
}
