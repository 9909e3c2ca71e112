use crate::model::requirement::Requirement;
use crate::model::trick::Trick;
use std::fmt;

/// Caller-owned list of trick definitions plus the id counter used to name
/// new tricks. The engine only ever borrows `tricks()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrickBook {
    tricks: Vec<Trick>,
    next_id: u32,
}

/// Edits to a trick book, expressed as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickCommand {
    AddTrick {
        name: Option<String>,
    },
    RemoveTrick {
        id: u32,
    },
    RenameTrick {
        id: u32,
        name: String,
    },
    SetActive {
        id: u32,
        active: bool,
    },
    AddRequirement {
        id: u32,
        requirement: Requirement,
    },
    SetRequirement {
        id: u32,
        index: usize,
        requirement: Requirement,
    },
    RemoveRequirement {
        id: u32,
        index: usize,
    },
}

/// What a successful command touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Added(u32),
    Removed(u32),
    Updated(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    UnknownTrick(u32),
    RequirementOutOfRange { id: u32, index: usize, len: usize },
    InvalidCount(u32),
    EmptyName,
}

impl fmt::Display for BookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookError::UnknownTrick(id) => write!(f, "no trick with id {id}"),
            BookError::RequirementOutOfRange { id, index, len } => write!(
                f,
                "trick {id} has {len} requirement(s); index {index} is out of range"
            ),
            BookError::InvalidCount(count) => {
                write!(f, "requirement count must be at least 1 (got {count})")
            }
            BookError::EmptyName => write!(f, "trick name must not be empty"),
        }
    }
}

impl std::error::Error for BookError {}

impl TrickBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a book from stored parts. `next_id` is raised past every
    /// existing id so new tricks never reuse one.
    pub fn from_parts(tricks: Vec<Trick>, next_id: u32) -> Self {
        let floor = tricks.iter().map(|t| t.id + 1).max().unwrap_or(0);
        Self {
            tricks,
            next_id: next_id.max(floor),
        }
    }

    pub fn tricks(&self) -> &[Trick] {
        &self.tricks
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn get(&self, id: u32) -> Option<&Trick> {
        self.tricks.iter().find(|t| t.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.tricks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tricks.len()
    }

    pub fn apply(&mut self, command: TrickCommand) -> Result<CommandOutcome, BookError> {
        match command {
            TrickCommand::AddTrick { name } => Ok(CommandOutcome::Added(self.add_trick(name)?)),
            TrickCommand::RemoveTrick { id } => {
                let before = self.tricks.len();
                self.tricks.retain(|t| t.id != id);
                if self.tricks.len() == before {
                    return Err(BookError::UnknownTrick(id));
                }
                Ok(CommandOutcome::Removed(id))
            }
            TrickCommand::RenameTrick { id, name } => {
                let name = validate_name(name)?;
                self.trick_mut(id)?.name = name;
                Ok(CommandOutcome::Updated(id))
            }
            TrickCommand::SetActive { id, active } => {
                self.trick_mut(id)?.active = active;
                Ok(CommandOutcome::Updated(id))
            }
            TrickCommand::AddRequirement { id, requirement } => {
                validate_requirement(requirement)?;
                self.trick_mut(id)?.requirements.push(requirement);
                Ok(CommandOutcome::Updated(id))
            }
            TrickCommand::SetRequirement {
                id,
                index,
                requirement,
            } => {
                validate_requirement(requirement)?;
                let slot = requirement_slot(self.trick_mut(id)?, index)?;
                *slot = requirement;
                Ok(CommandOutcome::Updated(id))
            }
            TrickCommand::RemoveRequirement { id, index } => {
                let trick = self.trick_mut(id)?;
                requirement_slot(trick, index)?;
                trick.requirements.remove(index);
                Ok(CommandOutcome::Updated(id))
            }
        }
    }

    fn add_trick(&mut self, name: Option<String>) -> Result<u32, BookError> {
        let id = self.next_id;
        let name = match name {
            Some(name) => validate_name(name)?,
            None => format!("New Trick {id}"),
        };
        self.tricks.push(Trick::new(id, name));
        self.next_id += 1;
        Ok(id)
    }

    fn trick_mut(&mut self, id: u32) -> Result<&mut Trick, BookError> {
        self.tricks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(BookError::UnknownTrick(id))
    }
}

fn validate_name(name: String) -> Result<String, BookError> {
    if name.trim().is_empty() {
        return Err(BookError::EmptyName);
    }
    Ok(name)
}

fn validate_requirement(requirement: Requirement) -> Result<(), BookError> {
    if requirement.count == 0 {
        return Err(BookError::InvalidCount(requirement.count));
    }
    Ok(())
}

fn requirement_slot(trick: &mut Trick, index: usize) -> Result<&mut Requirement, BookError> {
    let id = trick.id;
    let len = trick.requirements.len();
    trick
        .requirements
        .get_mut(index)
        .ok_or(BookError::RequirementOutOfRange { id, index, len })
}

#[cfg(test)]
mod tests {
    use super::{BookError, CommandOutcome, TrickBook, TrickCommand};
    use crate::model::requirement::Requirement;
    use crate::model::trick::Trick;

    #[test]
    fn add_trick_uses_default_name_and_bumps_counter() {
        let mut book = TrickBook::new();
        let outcome = book.apply(TrickCommand::AddTrick { name: None }).unwrap();
        assert_eq!(outcome, CommandOutcome::Added(0));
        assert_eq!(book.tricks()[0].name, "New Trick 0");
        assert!(book.tricks()[0].active);
        assert!(book.tricks()[0].requirements.is_empty());
        assert_eq!(book.next_id(), 1);
    }

    #[test]
    fn ids_are_never_reused_after_removal() {
        let mut book = TrickBook::new();
        book.apply(TrickCommand::AddTrick { name: None }).unwrap();
        book.apply(TrickCommand::AddTrick { name: None }).unwrap();
        book.apply(TrickCommand::RemoveTrick { id: 1 }).unwrap();
        let outcome = book
            .apply(TrickCommand::AddTrick {
                name: Some("Ambitious".into()),
            })
            .unwrap();
        assert_eq!(outcome, CommandOutcome::Added(2));
        let ids: Vec<u32> = book.tricks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn requirement_commands_edit_in_place() {
        let mut book = TrickBook::new();
        book.apply(TrickCommand::AddTrick { name: None }).unwrap();
        book.apply(TrickCommand::AddRequirement {
            id: 0,
            requirement: Requirement::default(),
        })
        .unwrap();
        book.apply(TrickCommand::AddRequirement {
            id: 0,
            requirement: Requirement::any(3),
        })
        .unwrap();
        book.apply(TrickCommand::SetRequirement {
            id: 0,
            index: 0,
            requirement: Requirement::identical(4),
        })
        .unwrap();
        book.apply(TrickCommand::RemoveRequirement { id: 0, index: 1 })
            .unwrap();

        assert_eq!(
            book.get(0).unwrap().requirements,
            vec![Requirement::identical(4)]
        );
    }

    #[test]
    fn unknown_ids_and_indices_are_errors() {
        let mut book = TrickBook::new();
        assert_eq!(
            book.apply(TrickCommand::RemoveTrick { id: 7 }),
            Err(BookError::UnknownTrick(7))
        );
        book.apply(TrickCommand::AddTrick { name: None }).unwrap();
        assert_eq!(
            book.apply(TrickCommand::RemoveRequirement { id: 0, index: 0 }),
            Err(BookError::RequirementOutOfRange {
                id: 0,
                index: 0,
                len: 0
            })
        );
    }

    #[test]
    fn zero_counts_and_blank_names_are_rejected() {
        let mut book = TrickBook::new();
        book.apply(TrickCommand::AddTrick { name: None }).unwrap();
        assert_eq!(
            book.apply(TrickCommand::AddRequirement {
                id: 0,
                requirement: Requirement::identical(0),
            }),
            Err(BookError::InvalidCount(0))
        );
        assert_eq!(
            book.apply(TrickCommand::RenameTrick {
                id: 0,
                name: "  ".into(),
            }),
            Err(BookError::EmptyName)
        );
    }

    #[test]
    fn set_active_toggles_participation() {
        let mut book = TrickBook::new();
        book.apply(TrickCommand::AddTrick { name: None }).unwrap();
        book.apply(TrickCommand::SetActive {
            id: 0,
            active: false,
        })
        .unwrap();
        assert!(!book.get(0).unwrap().active);
    }

    #[test]
    fn from_parts_raises_stale_counter() {
        let book = TrickBook::from_parts(vec![Trick::new(5, "Old")], 2);
        assert_eq!(book.next_id(), 6);
    }
}
