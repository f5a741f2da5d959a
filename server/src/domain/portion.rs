//! Rental unit entities and the persisted document root.
//!
//! `Document` is the single root object persisted to storage; it owns every
//! `Portion` in insertion order. Types here carry the serde contract for the
//! flat-file JSON store, so field names and shapes are part of the on-disk
//! format.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Monthly charge breakdown for one portion.
///
/// ## Invariants
/// - `total == rent + water + electricity + extra`, established by
///   [`Bill::new`] at write time and never recomputed on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Bill {
    #[schema(value_type = String, example = "12000")]
    pub rent: Decimal,
    #[schema(value_type = String, example = "350")]
    pub water: Decimal,
    #[schema(value_type = String, example = "1240.50")]
    pub electricity: Decimal,
    #[schema(value_type = String, example = "0")]
    pub extra: Decimal,
    #[schema(value_type = String, example = "13590.50")]
    pub total: Decimal,
}

impl Bill {
    /// Build a bill with the total computed from its parts.
    ///
    /// # Examples
    /// ```
    /// use rentledger::domain::Bill;
    /// use rust_decimal::Decimal;
    ///
    /// let bill = Bill::new(
    ///     Decimal::from(1000),
    ///     Decimal::from(100),
    ///     Decimal::from(200),
    ///     Decimal::ZERO,
    /// );
    /// assert_eq!(bill.total, Decimal::from(1300));
    /// ```
    pub fn new(rent: Decimal, water: Decimal, electricity: Decimal, extra: Decimal) -> Self {
        let total = rent + water + electricity + extra;
        Self {
            rent,
            water,
            electricity,
            extra,
            total,
        }
    }
}

/// Which attachment list a stored file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    IdProof,
    Photo,
}

/// A rentable unit with its tenant details, attachments, and bills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Portion {
    /// Unique within the document; assigned at creation, never reused.
    pub id: u64,
    /// Location identifier; immutable after creation.
    pub floor: String,
    /// Unit label within the floor; immutable after creation. Uniqueness is
    /// not enforced.
    pub portion_no: String,
    #[serde(rename = "type")]
    pub portion_type: String,
    pub name: String,
    pub tenant_type: String,
    /// Tenant member names in the order they were entered.
    pub members: Vec<String>,
    pub contact_number: String,
    #[serde(default)]
    pub contact_number_2: String,
    /// Stored filenames; append-only until the portion is deleted.
    pub id_proofs: Vec<String>,
    pub photos: Vec<String>,
    /// Keyed by normalized month label, e.g. "march 2024".
    pub bills: BTreeMap<String, Bill>,
}

impl Portion {
    /// Borrow the attachment list for the given kind.
    pub fn attachments(&self, kind: AttachmentKind) -> &[String] {
        match kind {
            AttachmentKind::IdProof => &self.id_proofs,
            AttachmentKind::Photo => &self.photos,
        }
    }

    /// Mutably borrow the attachment list for the given kind.
    pub fn attachments_mut(&mut self, kind: AttachmentKind) -> &mut Vec<String> {
        match kind {
            AttachmentKind::IdProof => &mut self.id_proofs,
            AttachmentKind::Photo => &mut self.photos,
        }
    }
}

/// Parse a comma-separated member list: entries trimmed, empties dropped,
/// order preserved.
///
/// # Examples
/// ```
/// use rentledger::domain::parse_members;
///
/// assert_eq!(parse_members("Alice, Bob,, "), vec!["Alice", "Bob"]);
/// ```
pub fn parse_members(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|member| !member.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Normalize a bill month label so differently-cased submissions address the
/// same bill.
pub fn normalize_month_key(month: &str) -> String {
    month.trim().to_lowercase()
}

/// Validation failures detected at the document load boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentValidationError {
    /// Two portions share the same id.
    #[error("duplicate portion id {id}")]
    DuplicateId { id: u64 },
}

/// Root persisted object: every portion, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Document {
    pub portions: Vec<Portion>,
}

impl Document {
    /// Next free portion id: 1 for an empty document, otherwise one past the
    /// highest id ever present. Recomputed from current state; callers must
    /// hold the write lock across allocation and save.
    pub fn next_id(&self) -> u64 {
        self.portions
            .iter()
            .map(|portion| portion.id)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Find a portion by id.
    pub fn find(&self, id: u64) -> Option<&Portion> {
        self.portions.iter().find(|portion| portion.id == id)
    }

    /// Find a portion by id for mutation.
    pub fn find_mut(&mut self, id: u64) -> Option<&mut Portion> {
        self.portions.iter_mut().find(|portion| portion.id == id)
    }

    /// Remove and return a portion by id.
    pub fn remove(&mut self, id: u64) -> Option<Portion> {
        let index = self.portions.iter().position(|portion| portion.id == id)?;
        Some(self.portions.remove(index))
    }

    /// Portions on the given floor, by exact match, in insertion order.
    pub fn by_floor(&self, floor: &str) -> Vec<&Portion> {
        self.portions
            .iter()
            .filter(|portion| portion.floor == floor)
            .collect()
    }

    /// Reject documents that violate the id uniqueness invariant. Called at
    /// the load boundary so malformed state never reaches business logic.
    pub fn validate(&self) -> Result<(), DocumentValidationError> {
        let mut seen = std::collections::HashSet::new();
        for portion in &self.portions {
            if !seen.insert(portion.id) {
                return Err(DocumentValidationError::DuplicateId { id: portion.id });
            }
        }
        Ok(())
    }
}
