// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Resume data model, serialised in the camelCase shape the form editor saves.

use cvpress_core::error::{CvpressError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub gpa: Option<String>,
    pub coursework: Option<String>,
    pub transcript_link: Option<String>,
}

/// A project entry. Stored under `experience` for compatibility with saved data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    /// Technology stack.
    pub company: String,
    /// Project title.
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
    pub project_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certificate {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub issue_date: String,
    pub verify_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: Option<String>,
    pub verify_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnicalSkills {
    pub languages: String,
    pub tools_frameworks: String,
    pub web_programming: String,
    pub databases: String,
    pub domain_knowledge: String,
}

impl TechnicalSkills {
    /// Non-empty skill rows with their display labels, in print order.
    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        [
            ("Languages", self.languages.as_str()),
            ("Tools & Frameworks", self.tools_frameworks.as_str()),
            ("Web Programming", self.web_programming.as_str()),
            ("Databases", self.databases.as_str()),
            ("Domain Knowledge", self.domain_knowledge.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect()
    }
}

/// Everything the form collects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub leetcode: String,
    pub summary: String,
    pub education: Vec<Education>,
    /// Projects.
    pub experience: Vec<Project>,
    pub work_experience: Vec<WorkExperience>,
    pub skills: Vec<String>,
    pub technical_skills: TechnicalSkills,
    pub certificates: Vec<Certificate>,
    pub achievements: Vec<Achievement>,
}

impl ResumeData {
    /// Parse resume data saved by the form editor.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| CvpressError::InvalidResume(err.to_string()))
    }

    /// Load resume data from a JSON file.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn has_personal_info(&self) -> bool {
        [
            &self.full_name,
            &self.email,
            &self.phone,
            &self.linkedin,
            &self.github,
            &self.leetcode,
        ]
        .iter()
        .any(|field| !field.trim().is_empty())
    }
}
