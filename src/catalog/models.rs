//! Perfume catalog models and data structures.
//!
//! Contains the record type returned by the catalog service, the creation
//! payload, and the in-progress form draft.

use serde::{Deserialize, Serialize};

/// Represents a perfume record from the catalog service.
///
/// Mirrors the server's schema verbatim; the client never reorders,
/// filters, or patches records locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Perfume {
    /// Server-assigned identifier, immutable once created
    pub id: i64,
    /// Perfume name
    pub name: String,
    /// Brand name
    pub brand: String,
    /// Fragrance notes (free text)
    #[serde(default)]
    pub notes: Option<String>,
    /// Price per 100ml, if known
    #[serde(default)]
    pub price: Option<f64>,
    /// Product image URL, if the service resolved one
    #[serde(default)]
    pub image: Option<String>,
}

impl Perfume {
    /// Fragrance notes as display text.
    ///
    /// # Returns
    /// * `&str` - Notes text, empty when the record carries none
    pub fn notes(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }

    /// Format the price for display.
    ///
    /// # Returns
    /// * `String` - Formatted price string (e.g., "$45.00 / 100ml") or "Price: N/A"
    pub fn format_price(&self) -> String {
        match self.price {
            Some(price) => format!("${:.2} / 100ml", price),
            None => "Price: N/A".to_string(),
        }
    }
}

/// Creation/update payload sent to the catalog service.
///
/// All fields are trimmed before submission; see [`Draft::validated`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewPerfume {
    /// Perfume name
    pub name: String,
    /// Brand name
    pub brand: String,
    /// Fragrance notes (may be empty)
    pub notes: String,
}

/// Unsaved form fields for a record not yet submitted.
///
/// Held by the application state and only turned into a [`NewPerfume`]
/// payload once it passes validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    /// Name input
    pub name: String,
    /// Brand input
    pub brand: String,
    /// Notes input
    pub notes: String,
}

impl Draft {
    /// Build a draft prefilled from an existing record, for editing.
    pub fn from_record(record: &Perfume) -> Self {
        Self {
            name: record.name.clone(),
            brand: record.brand.clone(),
            notes: record.notes().to_string(),
        }
    }

    /// Validate the draft and produce a submission payload.
    ///
    /// # Returns
    /// * `Option<NewPerfume>` - Trimmed payload, or None when name or brand
    ///   is empty after trimming. No request may be issued for an invalid
    ///   draft.
    pub fn validated(&self) -> Option<NewPerfume> {
        let name = self.name.trim();
        let brand = self.brand.trim();
        if name.is_empty() || brand.is_empty() {
            return None;
        }
        Some(NewPerfume {
            name: name.to_string(),
            brand: brand.to_string(),
            notes: self.notes.trim().to_string(),
        })
    }

    /// Reset all fields to empty.
    pub fn clear(&mut self) {
        self.name.clear();
        self.brand.clear();
        self.notes.clear();
    }

    /// Check whether every field is empty.
    #[allow(dead_code)] // Useful for a future "discard draft?" prompt
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.brand.is_empty() && self.notes.is_empty()
    }
}
