//! Name-keyed backend construction.
//!
//! Hosts that choose their export format at runtime look backends up
//! by name instead of naming concrete types. Registration is explicit,
//! a registry starts out empty.

use std::collections::BTreeMap;

use crate::{
    canvas::ExportBackend,
    error::{Error, Result},
    pdf_canvas::PdfCanvas,
};

/// Name the PDF backend is conventionally registered under.
pub const PDF_BACKEND_NAME: &str = "pdf";

/// Constructor for a registered backend.
pub type BackendFactory = Box<dyn Fn() -> Box<dyn ExportBackend>>;

/// Maps backend names to factories.
///
/// ```
/// use pdfcanvas::{register_pdf, Registry, PDF_BACKEND_NAME};
///
/// let mut registry = Registry::new();
/// register_pdf(&mut registry);
/// let backend = registry.create(PDF_BACKEND_NAME).unwrap();
/// ```
#[derive(Default)]
pub struct Registry {
    factories: BTreeMap<String, BackendFactory>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` under `name`, replacing any previous entry
    /// with the same name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn() -> Box<dyn ExportBackend> + 'static,
    ) {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Builds a fresh backend for `name`.
    pub fn create(&self, name: &str) -> Result<Box<dyn ExportBackend>> {
        match self.factories.get(name) {
            Some(factory) => Ok(factory()),
            None => Err(Error::UnknownBackend(name.to_string())),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(|k| k.as_str()).collect()
    }
}

/// Registers the PDF backend under [`PDF_BACKEND_NAME`].
pub fn register_pdf(registry: &mut Registry) {
    registry.register(PDF_BACKEND_NAME, || Box::new(PdfCanvas::new()));
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn create_known_backend() {
        let mut registry = Registry::new();
        register_pdf(&mut registry);
        assert!(registry.contains("pdf"));
        assert_eq!(registry.names(), vec!["pdf"]);
        assert!(registry.create("pdf").is_ok());
    }

    #[test]
    fn unknown_name_is_an_error() {
        let registry = Registry::new();
        match registry.create("svg") {
            Err(Error::UnknownBackend(name)) => assert_eq!(name, "svg"),
            other => panic!("expected UnknownBackend, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn factories_produce_independent_backends() {
        use crate::canvas::Canvas;

        let mut registry = Registry::new();
        register_pdf(&mut registry);
        let mut a = registry.create("pdf").unwrap();
        let b = registry.create("pdf").unwrap();
        a.begin(10.0, 10.0).unwrap();
        drop(b);
        a.end().unwrap();
    }
}
