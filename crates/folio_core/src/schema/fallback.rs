//! Built-in fallback document used when no other source is available.

use crate::model::document::{Document, Profile};

/// Default portrait asset, also used when a profile photo fails to load.
pub const DEFAULT_PHOTO: &str = "assets/profile.png";

/// Display name used when the profile name is blank.
pub const FALLBACK_NAME: &str = "Hyuckjin Jang";

/// Returns the hard-coded profile with every section empty.
pub fn fallback_document() -> Document {
    let links = [
        ("cv", "CV_Hyuckjin%20Jang%20(11).pdf"),
        ("orcid", ""),
        ("linkedin", ""),
        ("scholar", ""),
        ("homepage", "https://bit.ly/4ktJ2ah"),
    ]
    .into_iter()
    .map(|(name, url)| (name.to_string(), url.to_string()))
    .collect();

    Document::with_profile(Profile {
        name: Some(FALLBACK_NAME.to_string()),
        affiliation: Some("Graduate School of Culture Technology, KAIST".to_string()),
        intro: Some(
            "Human-Computer Interaction researcher in XR, sensory substitution, and assistive technology."
                .to_string(),
        ),
        area_of_interest: vec![
            "Human-Computer Interaction".to_string(),
            "Extended Reality".to_string(),
        ],
        email: Some("hyuckjin.jang@kaist.ac.kr".to_string()),
        photo: Some(DEFAULT_PHOTO.to_string()),
        links,
        ..Profile::default()
    })
}
