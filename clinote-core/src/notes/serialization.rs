use crate::types::*;
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::str::FromStr;

/// Machine-readable output shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Full nested tree with schema version and profile
    #[default]
    Tree,
    /// Leaf texts in reading order
    Flat,
    /// Section label -> fields
    Sections,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tree" => Ok(OutputFormat::Tree),
            "flat" => Ok(OutputFormat::Flat),
            "sections" => Ok(OutputFormat::Sections),
            other => Err(anyhow!("unknown output format '{other}' (expected tree, flat or sections)")),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TreeDocument<'a> {
    pub schema_version: &'static str,
    pub note: &'a ClinicalNote,
    pub profile: &'a NoteProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlatDocument {
    pub format: String,
    pub chunks: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionsDocument {
    pub format: String,
    pub sections: Vec<SectionEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionEntry {
    pub label: String,
    pub fields: Vec<FieldEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub kind: ItemKind,
    pub text: String,
}

impl ProcessedNote {
    pub fn to_tree_format(&self) -> TreeDocument<'_> {
        TreeDocument {
            schema_version: SCHEMA_VERSION,
            note: &self.note,
            profile: &self.profile,
        }
    }

    pub fn to_flat_format(&self) -> FlatDocument {
        FlatDocument {
            format: "flat".to_string(),
            chunks: self
                .note
                .leaves()
                .filter_map(NoteItem::text)
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn to_sections_format(&self) -> SectionsDocument {
        let sections = self
            .note
            .sections()
            .map(|section| SectionEntry {
                label: section.label.clone().unwrap_or_default(),
                fields: section
                    .iter()
                    .skip(1)
                    .filter_map(|(item, _)| {
                        item.text().map(|text| FieldEntry {
                            label: item.label.clone(),
                            kind: item.kind,
                            text: text.to_string(),
                        })
                    })
                    .collect(),
            })
            .collect();

        SectionsDocument {
            format: "sections".to_string(),
            sections,
        }
    }

    pub fn to_json(&self, format: OutputFormat) -> Result<String> {
        let json = match format {
            OutputFormat::Tree => serde_json::to_string_pretty(&self.to_tree_format())?,
            OutputFormat::Flat => serde_json::to_string_pretty(&self.to_flat_format())?,
            OutputFormat::Sections => serde_json::to_string_pretty(&self.to_sections_format())?,
        };
        Ok(json)
    }

    pub fn save_with_format(&self, path: &str, format: OutputFormat) -> Result<()> {
        std::fs::write(path, self.to_json(format)?)?;
        Ok(())
    }
}
