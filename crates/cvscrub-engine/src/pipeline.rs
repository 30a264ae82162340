//! End-to-end document scrubbing
//!
//! surname → email/URL spans → brand protect → detectors → scrub → brand restore

use cvscrub_config::Config;
use cvscrub_core::{BrandGuard, Category, Result, find_candidate_surname};
use cvscrub_detectors::{
    AddressDetector, DetectorSet, EmailDetector, EntityDetector, LocalTermsDetector,
    PhoneDetector, PostcodeDetector, SurnameDetector, UrlDetector,
};
use std::sync::Arc;

use crate::labeler::Labeler;
use crate::scrubber::{Scrubbed, Scrubber};

/// Scrubs whole documents with a fixed detector set and salt
pub struct Pipeline {
    brands: Vec<String>,
    local_terms: Vec<String>,
    /// Email and URL detectors, also run before brand protection
    contacts: DetectorSet,
    detectors: DetectorSet,
    labeler: Labeler,
    record_mapping: bool,
}

impl Pipeline {
    pub fn new(brands: Vec<String>, detectors: DetectorSet, labeler: Labeler) -> Self {
        Self {
            brands,
            local_terms: Vec::new(),
            contacts: DetectorSet::new(),
            detectors,
            labeler,
            record_mapping: false,
        }
    }

    /// Build the detector set and labeler described by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut contacts = DetectorSet::new();
        if config.detectors.email {
            contacts = contacts.with(EmailDetector);
        }
        if config.detectors.url {
            contacts = contacts.with(UrlDetector);
        }

        let mut detectors = contacts.clone();

        if !config.local_terms.is_empty() {
            detectors = detectors.with(LocalTermsDetector::new(&config.local_terms)?);
        }
        if config.detectors.phone {
            detectors = detectors.with(PhoneDetector);
        }
        if config.detectors.postcode {
            detectors = detectors.with(PostcodeDetector);
        }
        if config.detectors.address {
            detectors = detectors.with(AddressDetector::new(&config.address_suffixes)?);
        }
        if config.detectors.entities {
            let mut categories = Vec::new();
            if config.entities.names {
                categories.push(Category::Name);
            }
            if config.entities.organizations {
                categories.push(Category::Organization);
            }
            if config.entities.locations {
                categories.push(Category::Location);
            }

            if !categories.is_empty() {
                let entities = EntityDetector::with_gazetteer(
                    &config.entities.first_names,
                    &config.entities.places,
                )?
                .only(&categories);
                detectors = detectors.with(entities);
            }
        }

        let labeler = match &config.salt {
            Some(salt) => Labeler::new(salt),
            None => {
                tracing::debug!("no salt configured, labels are stable for this run only");
                Labeler::random()
            }
        };

        tracing::debug!(detectors = ?detectors.names(), "pipeline ready");

        Ok(Self::new(config.brands.clone(), detectors, labeler)
            .with_contacts(contacts)
            .with_local_terms(&config.local_terms))
    }

    /// Detectors whose matches must not be split by brand sentinels.
    ///
    /// They are run on the raw text first and brand occurrences inside their
    /// spans stay unprotected. They should also be part of the main set.
    pub fn with_contacts(mut self, contacts: DetectorSet) -> Self {
        self.contacts = contacts;
        self
    }

    /// Brands overlapping these terms are not protected, so the terms still match
    pub fn with_local_terms(mut self, terms: &[String]) -> Self {
        self.local_terms = terms.iter().map(|t| t.to_lowercase()).collect();
        self
    }

    pub fn with_mapping(mut self, record: bool) -> Self {
        self.record_mapping = record;
        self
    }

    /// Scrub one document.
    ///
    /// Fails with `SurnameNotFound` when the document has no surname field.
    pub fn run(&self, text: &str, source: Option<&str>) -> Result<Scrubbed> {
        let surname = find_candidate_surname(text)?;

        let guard = self.guard_for(&surname)?;
        let contacts = self.contacts.detect_all(text);
        let protected = guard.protect_outside(text, &contacts);

        let mut detectors = self.detectors.clone();
        detectors.register(Arc::new(SurnameDetector::new(&surname)?));

        let scrubber =
            Scrubber::new(detectors, self.labeler.clone()).with_mapping(self.record_mapping);
        let mut scrubbed = scrubber.scrub(&protected.text, source)?;

        scrubbed.text = protected.restore(&scrubbed.text);
        if let Some(mapping) = scrubbed.mapping.as_mut() {
            mapping.map_originals(|original| protected.restore(original));
        }

        tracing::debug!(
            brands = protected.count(),
            replaced = scrubbed.replaced,
            "document scrubbed"
        );

        Ok(scrubbed)
    }

    // A brand sharing a word with the surname, or overlapping a local term,
    // would shield it from redaction
    fn guard_for(&self, surname: &str) -> Result<BrandGuard> {
        let surname = surname.to_lowercase();
        BrandGuard::new(self.brands.iter().filter(|brand| {
            let brand = brand.to_lowercase();
            !contains_word(&brand, &surname)
                && !contains_word(&surname, &brand)
                && !self
                    .local_terms
                    .iter()
                    .any(|term| term.contains(&brand) || brand.contains(term.as_str()))
        }))
    }
}

/// `needle` occurs in `haystack` with no letter or digit directly on either side
fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }

    haystack.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvscrub_core::Error;

    fn pipeline() -> Pipeline {
        let config = Config {
            salt: Some("pepper".to_string()),
            ..Config::default()
        };
        Pipeline::from_config(&config).unwrap().with_mapping(true)
    }

    #[test]
    fn test_surname_redacted_everywhere() {
        let text = "**Surname:** Smith\nGitHub: github.com/jsmith\nRefer to SMITH for details";
        let scrubbed = pipeline().run(text, None).unwrap();

        assert!(!scrubbed.text.to_lowercase().contains("smith"));
        assert!(scrubbed.text.contains("{{SURNAME-"));
    }

    #[test]
    fn test_surname_inside_handles() {
        let config = Config {
            salt: Some("pepper".to_string()),
            detectors: cvscrub_config::DetectorsConfig {
                email: false,
                url: false,
                ..Default::default()
            },
            ..Config::default()
        };
        let pipeline = Pipeline::from_config(&config).unwrap().with_mapping(true);

        let text = "Surname: Smith\nEmail: jsmith@example.com\nGitHub: github.com/jsmith\n";
        let scrubbed = pipeline.run(text, None).unwrap();

        assert!(!scrubbed.text.to_lowercase().contains("smith"));
        assert!(scrubbed.text.contains("Email: j{{SURNAME-"));
        assert_eq!(scrubbed.mapping.unwrap().restore(&scrubbed.text), text);
    }

    #[test]
    fn test_emails_and_links_redacted() {
        let text = "Surname: Okafor\nEmail: jessica.o@gmail.com\nLinkedIn: https://linkedin.com/in/jessica-o-1987\nCode: github.com/jo-dev\n";
        let scrubbed = pipeline().run(text, None).unwrap();
        let mapping = scrubbed.mapping.unwrap();

        assert!(!scrubbed.text.contains("jessica.o@gmail.com"));
        assert!(!scrubbed.text.contains("linkedin.com"));
        assert!(!scrubbed.text.contains("github.com"));
        assert!(scrubbed.text.contains("Email: {{EMAIL-"));
        assert!(scrubbed.text.contains("LinkedIn: {{URL-"));
        assert!(mapping.iter().any(|(_, o)| o == "github.com/jo-dev"));
        assert_eq!(mapping.restore(&scrubbed.text), text);
    }

    #[test]
    fn test_email_holding_surname_is_one_label() {
        let text = "Surname: Okafor\nContact: j.okafor@acme.co.uk\n";
        let scrubbed = pipeline().run(text, None).unwrap();

        assert!(scrubbed.text.starts_with("Surname: {{SURNAME-"));
        assert!(scrubbed.text.contains("Contact: {{EMAIL-"));
        assert!(!scrubbed.text.contains("acme"));
    }

    #[test]
    fn test_surname_sharing_letters_with_brand_keeps_brand() {
        let text = "Surname: Lawson\nCertified on AWS";
        let scrubbed = pipeline().run(text, None).unwrap();

        assert!(scrubbed.text.ends_with("Certified on AWS"));
        assert!(!scrubbed.text.contains("Lawson"));
    }

    #[test]
    fn test_surname_inside_sentinel_text_is_harmless() {
        let text = "Surname: Rand\nRand ran Kubernetes clusters";
        let scrubbed = pipeline().run(text, None).unwrap();

        assert!(scrubbed.text.ends_with(" ran Kubernetes clusters"));
        assert!(!scrubbed.text.contains("Rand"));
    }

    #[test]
    fn test_contains_word() {
        assert!(contains_word("oracle-hughes", "oracle"));
        assert!(contains_word("google cloud", "google"));
        assert!(!contains_word("lawson", "aws"));
        assert!(!contains_word("salesforce", "force"));
    }

    #[test]
    fn test_missing_surname_fails() {
        let err = pipeline().run("Name: John", None).unwrap_err();
        assert!(matches!(err, Error::SurnameNotFound));
    }

    #[test]
    fn test_brand_survives() {
        let text = "Surname: Smith\nLed a Microsoft Azure migration in Leeds";
        let scrubbed = pipeline().run(text, None).unwrap();

        assert!(scrubbed.text.contains("Microsoft Azure migration"));
        assert!(!scrubbed.text.contains("Leeds"));
        assert!(!scrubbed.text.contains('⟦'));
    }

    #[test]
    fn test_brand_matching_surname_is_not_protected() {
        let text = "Surname: Oracle\nOracle family business";
        let scrubbed = pipeline().run(text, None).unwrap();

        assert!(!scrubbed.text.contains("Oracle"));
    }

    #[test]
    fn test_surname_containing_brand_is_redacted() {
        let text = "Surname: Oracle-Hughes\nOracle-Hughes trained on Oracle";
        let scrubbed = pipeline().run(text, None).unwrap();

        assert!(!scrubbed.text.contains("Hughes"));
    }

    #[test]
    fn test_local_term_containing_brand_still_redacted() {
        let config = Config {
            salt: Some("pepper".to_string()),
            local_terms: vec!["Slack Street Social Club".to_string()],
            ..Config::default()
        };
        let pipeline = Pipeline::from_config(&config).unwrap().with_mapping(true);

        let text = "Surname: Smith\nTreasurer, Slack Street Social Club. Daily Slack user";
        let scrubbed = pipeline.run(text, None).unwrap();
        let mapping = scrubbed.mapping.unwrap();

        assert!(!scrubbed.text.contains("Social Club"));
        assert!(mapping.iter().any(|(_, o)| o == "Slack Street Social Club"));
        assert!(mapping.iter().all(|(_, o)| !o.contains('⟦')));
        assert_eq!(mapping.restore(&scrubbed.text), text);
    }
}
