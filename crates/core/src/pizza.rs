// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pizza creation payload.
//!
//! This is the body the create-resource endpoint accepts. The offline queue
//! treats it as opaque JSON; only the form handler builds it from this type.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Offered pizza sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Size {
    Personal,
    Small,
    Medium,
    /// Server-side default when a pizza is created without a size.
    #[default]
    Large,
    #[serde(rename = "Extra Large")]
    ExtraLarge,
}

impl Size {
    /// Returns the string representation used on the wire and in display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Size::Personal => "Personal",
            Size::Small => "Small",
            Size::Medium => "Medium",
            Size::Large => "Large",
            Size::ExtraLarge => "Extra Large",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Size {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "personal" => Ok(Size::Personal),
            "small" => Ok(Size::Small),
            "medium" => Ok(Size::Medium),
            "large" => Ok(Size::Large),
            "extra large" | "extra-large" | "extra_large" | "xl" => Ok(Size::ExtraLarge),
            _ => Err(Error::InvalidSize(s.to_string())),
        }
    }
}

/// A pizza as submitted by the creation form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pizza {
    pub pizza_name: String,
    pub created_by: String,
    #[serde(default)]
    pub size: Size,
    #[serde(default)]
    pub toppings: Vec<String>,
}

impl Pizza {
    pub fn new(pizza_name: impl Into<String>, created_by: impl Into<String>) -> Self {
        Pizza {
            pizza_name: pizza_name.into(),
            created_by: created_by.into(),
            size: Size::default(),
            toppings: Vec::new(),
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_toppings<I, S>(mut self, toppings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.toppings.extend(toppings.into_iter().map(Into::into));
        self
    }

    /// Checks the fields the form requires before submitting.
    ///
    /// Whitespace-only names count as empty. Blank toppings are rejected too.
    pub fn validate(&self) -> Result<()> {
        if self.pizza_name.trim().is_empty() {
            return Err(Error::FieldEmpty { field: "pizzaName" });
        }
        if self.created_by.trim().is_empty() {
            return Err(Error::FieldEmpty { field: "createdBy" });
        }
        if self.toppings.iter().any(|t| t.trim().is_empty()) {
            return Err(Error::FieldEmpty { field: "topping" });
        }
        Ok(())
    }

    /// Serialize into the JSON payload sent to the create-resource endpoint.
    pub fn to_payload(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
#[path = "pizza_tests.rs"]
mod tests;
