#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::template::TemplateKey;

#[derive(Debug, Error, Diagnostic)]
pub enum BledError {
    #[error("You can only choose one {group}.")]
    #[diagnostic(help("Conflicting flags: {flags}"))]
    ConflictingFlags { group: &'static str, flags: String },

    #[error("Project name must not be empty")]
    InvalidProjectName,

    #[error("Project {name} already exists")]
    #[diagnostic(help("Choose another project name or remove the existing '{name}'"))]
    DestinationExists { name: String, path: PathBuf },

    #[error("Template not implemented yet.")]
    #[diagnostic(help("No template bundle named '{key}'. Run with --list to see available templates"))]
    TemplateNotFound { key: TemplateKey },

    #[error("Template directory not found")]
    #[diagnostic(help(
        "Pass --templates-dir, set BLED_TEMPLATES_DIR, or set templates_dir in {config}"
    ))]
    TemplateRootMissing { config: String },

    #[error("Refusing to overwrite existing file: {path}")]
    WouldOverwrite { path: PathBuf },

    #[error("Manifest not found at {path}")]
    #[diagnostic(help("The template bundle is incomplete: it must contain a package.json"))]
    ManifestMissing { path: PathBuf },

    #[error("Manifest at {path} is a symlink")]
    #[diagnostic(help("package.json is rewritten in place and must be a regular file"))]
    ManifestSymlink { path: PathBuf },

    #[error("Failed to parse {path}")]
    #[diagnostic(help("The template bundle is corrupt: package.json must be valid JSON"))]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize {path}")]
    ManifestSerialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Manifest at {path} is not a JSON object")]
    #[diagnostic(help("The template bundle is corrupt: package.json must be a JSON object"))]
    ManifestShape { path: PathBuf },

    #[error("Failed to parse user config {path}")]
    #[diagnostic(help("Check the TOML syntax in your config file"))]
    UserConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk template directory {path}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Prompt failed")]
    Prompt {
        #[source]
        source: inquire::InquireError,
    },

    #[error("Operation cancelled.")]
    PromptCancelled,
}

pub type Result<T> = std::result::Result<T, BledError>;
