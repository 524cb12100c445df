#![allow(dead_code)]

use std::sync::Arc;

use argon2::Algorithm;

use quill_core::domain::{Identity, PostFields, Registration};
use quill_core::ports::RolePolicy;
use quill_core::services::{AuthService, ContentService, SignedIn};
use quill_infra::{
    Argon2PasswordService, InMemorySessionStore, InMemoryStore, JwtConfig, JwtTokenService,
    PasswordConfig,
};

pub struct Blog {
    pub store: InMemoryStore,
    pub auth: AuthService,
    pub content: ContentService,
}

pub fn blog() -> Blog {
    let store = InMemoryStore::new();
    let passwords = Argon2PasswordService::new(&PasswordConfig {
        algorithm: Algorithm::Argon2id,
        iterations: 1,
        memory_kib: 1024,
        parallelism: 1,
    })
    .unwrap();
    let tokens = JwtTokenService::new(JwtConfig {
        secret: "test-secret".to_string(),
        expiration_hours: 1,
        issuer: "quill-test".to_string(),
    });

    let auth = AuthService::new(
        store.users(),
        Arc::new(passwords),
        Arc::new(tokens),
        Arc::new(InMemorySessionStore::new()),
        Arc::new(RolePolicy),
    );
    let content = ContentService::new(
        store.users(),
        store.posts(),
        store.comments(),
        Arc::new(RolePolicy),
    );

    Blog {
        store,
        auth,
        content,
    }
}

pub fn registration(email: &str, username: &str) -> Registration {
    Registration {
        email: email.to_string(),
        username: username.to_string(),
        password: format!("{username}-password"),
    }
}

pub fn fields(title: &str) -> PostFields {
    PostFields {
        title: title.to_string(),
        subtitle: "Sub".to_string(),
        body: "<p>x</p>".to_string(),
        img_url: "http://i/1.png".to_string(),
    }
}

impl Blog {
    /// Registers the admin (first account) and a second, ordinary author.
    pub async fn admin_and_author(&self) -> (SignedIn, SignedIn) {
        let admin = self
            .auth
            .register(registration("admin@example.com", "admin"))
            .await
            .unwrap();
        let author = self
            .auth
            .register(registration("b@example.com", "bee"))
            .await
            .unwrap();
        (admin, author)
    }
}

pub fn identity(signed_in: &SignedIn) -> Identity {
    Identity::User(signed_in.user.clone())
}
