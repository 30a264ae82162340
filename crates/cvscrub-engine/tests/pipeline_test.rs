use cvscrub_config::Config;
use cvscrub_engine::Pipeline;

const CV: &str = "\
**Forename:** Jessica
**Surname:** Okafor
**Address:** 14 Mill Lane, Little Snoring, Norfolk NR21 0AB
**Mobile:** +44 7478 121959
**Email:** jessica.okafor@gmail.com
**LinkedIn:** https://www.linkedin.com/in/jessica-okafor

Profile
Jessica is a data engineer with eight years of Python and AWS experience.

Experience
Acme Widgets Ltd, Norwich (2019 - present)
- Built Kubernetes pipelines with Terraform.

Referees
Dr. Priya Patel, University of Leeds - 0113 496 0000
";

fn config(salt: &str) -> Config {
    Config {
        salt: Some(salt.to_string()),
        local_terms: vec!["Little Snoring".to_string()],
        ..Config::default()
    }
}

fn pipeline(salt: &str) -> Pipeline {
    Pipeline::from_config(&config(salt))
        .unwrap()
        .with_mapping(true)
}

#[test]
fn test_cv_is_scrubbed() {
    let scrubbed = pipeline("pepper").run(CV, Some("jessica.txt")).unwrap();
    let text = &scrubbed.text;

    for pii in [
        "Okafor",
        "Jessica",
        "14 Mill Lane",
        "Little Snoring",
        "Norfolk",
        "NR21 0AB",
        "7478 121959",
        "Acme Widgets",
        "Norwich",
        "Priya",
        "Patel",
        "University of Leeds",
        "0113 496 0000",
        "gmail.com",
        "linkedin.com",
    ] {
        assert!(!text.contains(pii), "{} leaked:\n{}", pii, text);
    }
    assert!(!text.to_lowercase().contains("okafor"), "surname leaked:\n{}", text);

    for kept in ["Python", "AWS", "Kubernetes", "Terraform", "data engineer", "Dr. "] {
        assert!(text.contains(kept), "{} was removed:\n{}", kept, text);
    }

    for stem in [
        "EMAIL",
        "URL",
        "SURNAME",
        "PHONE",
        "POSTCODE",
        "ADDRESS",
        "LOCAL",
        "NAME",
        "ORGANIZATION",
        "LOCATION",
    ] {
        assert!(
            text.contains(&format!("{{{{{}-", stem)),
            "no {} label:\n{}",
            stem,
            text
        );
    }
}

#[test]
fn test_mapping_reverses_scrub() {
    let scrubbed = pipeline("pepper").run(CV, Some("jessica.txt")).unwrap();
    let mapping = scrubbed.mapping.unwrap();

    assert_eq!(mapping.source.as_deref(), Some("jessica.txt"));
    assert_eq!(mapping.restore(&scrubbed.text), CV);
}

#[test]
fn test_repeated_text_shares_label() {
    let scrubbed = pipeline("pepper").run(CV, None).unwrap();
    let mapping = scrubbed.mapping.unwrap();

    let jessica: Vec<_> = mapping.iter().filter(|(_, o)| *o == "Jessica").collect();
    assert_eq!(jessica.len(), 1);

    let label = jessica[0].0;
    assert_eq!(scrubbed.text.matches(label).count(), 2);
}

#[test]
fn test_same_salt_is_deterministic() {
    let first = pipeline("pepper").run(CV, None).unwrap();
    let second = pipeline("pepper").run(CV, None).unwrap();
    let other = pipeline("paprika").run(CV, None).unwrap();

    assert_eq!(first.text, second.text);
    assert_ne!(first.text, other.text);
}

#[test]
fn test_mapping_json_round_trip() {
    let scrubbed = pipeline("pepper").run(CV, None).unwrap();
    let mapping = scrubbed.mapping.unwrap();

    let json = mapping.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["replacements"].as_object().unwrap().len() >= 8);

    let parsed = cvscrub_core::Mapping::from_json(&json).unwrap();
    assert_eq!(parsed.restore(&scrubbed.text), CV);
}

#[test]
fn test_disabled_detectors_leave_text() {
    let mut config = config("pepper");
    config.detectors.entities = false;
    config.detectors.address = false;
    config.detectors.email = false;
    config.local_terms.clear();

    let scrubbed = Pipeline::from_config(&config).unwrap().run(CV, None).unwrap();

    assert!(scrubbed.text.contains("Norwich"));
    assert!(scrubbed.text.contains("14 Mill Lane"));
    assert!(!scrubbed.text.to_lowercase().contains("okafor"));
    assert!(!scrubbed.text.contains("NR21 0AB"));
    assert!(scrubbed.text.contains("@gmail.com"));
    assert!(scrubbed.text.contains("{{URL-"));
}
