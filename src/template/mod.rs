pub mod catalog;
pub mod key;
pub mod root;

pub use catalog::{TemplateBundle, TemplateCatalog, MANIFEST_FILE};
pub use key::{resolve_template_key, TemplateKey};
pub use root::{resolve_template_root, TEMPLATES_ENV};
