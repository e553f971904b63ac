//! Bitwarden container construction from flat file configs

#![cfg(feature = "bitwarden")]

use std::cell::{Cell, RefCell};
use std::io::Write;

use cred_manage::{
    hash_password, BitwardenContainer, CredentialContainer, CredentialError, CredentialPrompt,
    FlatFileContainer, PromptResolver,
};

/// Initialize tracing for tests
fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("cred_manage=debug")
        .with_test_writer()
        .try_init();
}

/// Prompt that answers from a script and records the prompts it served
struct ScriptedPrompt {
    password: &'static str,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    fn new(password: &'static str) -> Self {
        Self {
            password,
            asked: RefCell::new(Vec::new()),
        }
    }
}

impl CredentialPrompt for ScriptedPrompt {
    fn read_email(&self) -> Result<String, CredentialError> {
        self.asked.borrow_mut().push("email".to_string());
        Ok("nobody@example.com".to_string())
    }

    fn read_password(&self, email: &str) -> Result<String, CredentialError> {
        self.asked.borrow_mut().push(format!("password:{email}"));
        Ok(self.password.to_string())
    }
}

fn config_file(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{json}").unwrap();
    file
}

#[test]
fn test_prompted_password_is_hashed() {
    init_test();

    let file = config_file(r#"{"username": "Nobody@Example.com", "client_secret": "abc"}"#);
    let resolver = PromptResolver::new(ScriptedPrompt::new("p4ssw0rd"));

    let container = BitwardenContainer::from_flat_file(file.path(), &resolver).unwrap();

    assert_eq!(container.username(), "Nobody@Example.com");
    assert_eq!(
        container.password(),
        "r5CFRR+n9NQI8a525FY+0BPR0HGOjVJX0cR1KEMnIOo="
    );
    assert_eq!(container.client_secret(), Some("abc"));
}

#[test]
fn test_only_the_password_is_prompted() {
    init_test();

    let file = config_file(r#"{"username": "someone@example.com", "password": null}"#);
    let prompt = ScriptedPrompt::new("hunter2");

    let hash = cred_manage::prompt_for_credentials(&prompt, Some("someone@example.com"), None)
        .unwrap();
    let container = BitwardenContainer::from_flat_file(file.path(), &|email: &str| {
        cred_manage::prompt_for_credentials(&prompt, Some(email), None)
    })
    .unwrap();

    assert_eq!(container.password(), hash);
    assert_eq!(hash, hash_password("someone@example.com", "hunter2"));
    assert_eq!(
        *prompt.asked.borrow(),
        vec![
            "password:someone@example.com".to_string(),
            "password:someone@example.com".to_string(),
        ]
    );
}

#[test]
fn test_hashed_password_in_config_skips_prompt() {
    init_test();

    let hash = hash_password("nobody@example.com", "p4ssw0rd");
    let file = config_file(&format!(
        r#"{{"username": "nobody@example.com", "password": "{hash}", "client_id": "cli"}}"#
    ));
    let prompt = ScriptedPrompt::new("unused");
    let resolver = PromptResolver::new(prompt);

    let container = BitwardenContainer::from_flat_file(file.path(), &resolver).unwrap();

    assert_eq!(container.password(), hash);
    assert_eq!(container.client_id(), "cli");
    assert_eq!(container.scope(), "api");
}

#[test]
fn test_config_errors_surface() {
    init_test();

    let resolver = |_: &str| Ok::<_, CredentialError>("digest".to_string());

    let missing = BitwardenContainer::from_flat_file(
        std::path::Path::new("/definitely/not/bw_api.json"),
        &resolver,
    );
    assert!(matches!(missing, Err(CredentialError::FileNotFound { .. })));

    let file = config_file("username = 'toml, not json'");
    let malformed = BitwardenContainer::from_flat_file(file.path(), &resolver);
    assert!(matches!(
        malformed,
        Err(CredentialError::InvalidConfig { .. })
    ));
}

#[test]
fn test_containers_share_the_contract() {
    init_test();

    let secret = config_file("  token-value  ");
    let flat = FlatFileContainer::new(secret.path()).unwrap();
    assert_eq!(flat.get_cred().unwrap(), "token-value");

    let config = config_file(r#"{"username": "nobody@example.com", "password": "digest"}"#);
    let resolver = |_: &str| Ok::<_, CredentialError>(String::new());
    let bw = BitwardenContainer::from_flat_file(config.path(), &resolver).unwrap();

    let err = bw.get_cred().unwrap_err();
    assert_eq!(err.to_string(), "bitwarden container does not implement get_cred");
}

#[test]
fn test_empty_username_fails_before_resolving() {
    init_test();

    let file = config_file(r#"{"username": ""}"#);
    let calls = Cell::new(0);
    let resolver = |_: &str| {
        calls.set(calls.get() + 1);
        Ok::<_, CredentialError>("digest".to_string())
    };

    let result = BitwardenContainer::from_flat_file(file.path(), &resolver);

    assert!(matches!(
        result,
        Err(CredentialError::MissingField { field: "username" })
    ));
    assert_eq!(calls.get(), 0);
}
