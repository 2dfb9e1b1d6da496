use std::collections::BTreeMap;

use applier_core::{
    AutomationRequest, LoginMethod, PlatformConfig, ValidationError, DEFAULT_KEYWORDS,
};

fn request_with(platforms: BTreeMap<String, PlatformConfig>) -> AutomationRequest {
    AutomationRequest {
        keywords: DEFAULT_KEYWORDS.to_string(),
        max_applications: 20,
        max_pages: 2,
        platforms,
    }
}

fn platform(enabled: bool, email: &str, password: &str, login_method: LoginMethod) -> PlatformConfig {
    PlatformConfig {
        enabled,
        email: email.to_string(),
        password: password.to_string(),
        login_method,
    }
}

#[test]
fn no_enabled_platform_is_rejected() {
    let mut platforms = BTreeMap::new();
    platforms.insert(
        "internshala".to_string(),
        platform(false, "a@b.com", "pw", LoginMethod::Email),
    );
    let err = request_with(platforms).validate().unwrap_err();
    assert_eq!(err, ValidationError::NoPlatformsEnabled);
    assert_eq!(err.to_string(), "No platforms enabled");
}

#[test]
fn email_login_requires_a_password() {
    let mut platforms = BTreeMap::new();
    platforms.insert(
        "internshala".to_string(),
        platform(true, "a@b.com", "", LoginMethod::Email),
    );
    let err = request_with(platforms).validate().unwrap_err();
    assert_eq!(
        err,
        ValidationError::PasswordRequired {
            platform: "internshala".to_string()
        }
    );
    assert_eq!(
        err.to_string(),
        "Password required for internshala with email login"
    );
}

#[test]
fn google_login_does_not_require_a_password() {
    let mut platforms = BTreeMap::new();
    platforms.insert(
        "internshala".to_string(),
        platform(true, "a@b.com", "", LoginMethod::Google),
    );
    assert!(request_with(platforms).validate().is_ok());
}

#[test]
fn enabled_platform_requires_an_email() {
    let mut platforms = BTreeMap::new();
    platforms.insert(
        "linkedin".to_string(),
        platform(true, "   ", "pw", LoginMethod::Email),
    );
    let err = request_with(platforms).validate().unwrap_err();
    assert_eq!(
        err,
        ValidationError::EmailRequired {
            platform: "linkedin".to_string()
        }
    );
}

#[test]
fn disabled_platforms_are_not_inspected() {
    let mut platforms = BTreeMap::new();
    platforms.insert(
        "internshala".to_string(),
        platform(true, "a@b.com", "pw", LoginMethod::Email),
    );
    // Incomplete, but disabled: must not fail validation.
    platforms.insert(
        "linkedin".to_string(),
        platform(false, "", "", LoginMethod::Email),
    );
    assert!(request_with(platforms).validate().is_ok());
}

#[test]
fn limits_are_bounded() {
    let mut platforms = BTreeMap::new();
    platforms.insert(
        "internshala".to_string(),
        platform(true, "a@b.com", "pw", LoginMethod::Email),
    );

    let mut request = request_with(platforms);
    request.max_applications = 0;
    assert_eq!(
        request.validate().unwrap_err(),
        ValidationError::MaxApplicationsOutOfRange { value: 0 }
    );

    request.max_applications = 101;
    assert!(matches!(
        request.validate().unwrap_err(),
        ValidationError::MaxApplicationsOutOfRange { value: 101 }
    ));

    request.max_applications = 100;
    request.max_pages = 0;
    assert_eq!(
        request.validate().unwrap_err(),
        ValidationError::MaxPagesOutOfRange { value: 0 }
    );

    request.max_pages = 11;
    assert!(matches!(
        request.validate().unwrap_err(),
        ValidationError::MaxPagesOutOfRange { value: 11 }
    ));

    request.max_pages = 10;
    assert!(request.validate().is_ok());
}
