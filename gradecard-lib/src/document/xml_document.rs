use super::XPathSelector;
use crate::Result;
use camino::Utf8Path;
use core::fmt;
use ohno::{IntoAppError, app_err};
use std::fs;
use sxd_document::Package;
use sxd_document::parser;

const LOG_TARGET: &str = "  document";

/// A parsed XML result artifact.
pub struct XmlDocument {
    package: Package,
}

impl XmlDocument {
    /// Parses XML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not well-formed XML.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_from(text, "<inline>")
    }

    /// Reads and parses an XML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not well-formed XML.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading artifact '{path}'"))?;
        let document = Self::parse_from(&text, path.as_str())?;
        log::debug!(target: LOG_TARGET, "Parsed artifact '{path}' ({} byte(s))", text.len());
        Ok(document)
    }

    fn parse_from(text: &str, origin: &str) -> Result<Self> {
        let package = parser::parse(text).map_err(|e| app_err!("could not parse XML document '{origin}': {e:?}"))?;
        Ok(Self { package })
    }

    /// A selector evaluating `XPath` 1.0 expressions against this document.
    #[must_use]
    pub fn selector(&self) -> XPathSelector<'_> {
        XPathSelector::new(self.package.as_document())
    }
}

impl fmt::Debug for XmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlDocument").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed() {
        let _ = XmlDocument::parse("<report><passed>true</passed></report>").unwrap();
    }

    #[test]
    fn test_parse_malformed() {
        let err = XmlDocument::parse("<report><passed>true</report>").unwrap_err();
        assert!(err.to_string().contains("<inline>"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = camino::Utf8PathBuf::try_from(tmp.path().join("report.xml")).unwrap();
        fs::write(&path, "<?xml version=\"1.0\"?><report errors=\"0\"/>").unwrap();
        let _ = XmlDocument::load(&path).unwrap();

        let missing = path.with_file_name("missing.xml");
        assert!(XmlDocument::load(&missing).is_err());
    }
}
