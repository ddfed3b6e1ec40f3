//! # Session store
//!
//! [`SessionStore`] is the single owner of the authenticated session. It
//! hydrates from durable storage at startup, persists every change, and
//! broadcasts the new state to subscribers (the route guard and the header
//! listen here instead of re-deriving "am I logged in" per screen).
//!
//! Invariant: the store holds either nothing or a session with a non-empty
//! token and subject id. A login-shaped response missing either field is
//! treated as invalid credentials and never stored, so a half-populated
//! session cannot exist.

use std::cell::RefCell;
use std::rc::Rc;

use api::{Gateway, GatewayError, IdentifierKind, LoginRequest, LoginResponse};
use store::{Session, SessionBackend};

type Subscriber = Box<dyn Fn(Option<&Session>)>;

struct Inner<B> {
    backend: B,
    current: RefCell<Option<Session>>,
    subscribers: RefCell<Vec<Subscriber>>,
}

/// Process-wide session holder. Clones share state; the app creates one in
/// its root provider and hands clones to whoever needs it.
pub struct SessionStore<B: SessionBackend> {
    inner: Rc<Inner<B>>,
}

impl<B: SessionBackend> Clone for SessionStore<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<B: SessionBackend> SessionStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            inner: Rc::new(Inner {
                backend,
                current: RefCell::new(None),
                subscribers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Load the persisted session, if storage holds a usable one. Called
    /// once at startup; broadcasts the result either way.
    pub fn hydrate(&self) {
        let loaded = self.inner.backend.load().filter(usable);
        if loaded.is_some() {
            tracing::info!("session restored from storage");
        }
        *self.inner.current.borrow_mut() = loaded;
        self.notify();
    }

    /// Synchronous read of the current session.
    pub fn current(&self) -> Option<Session> {
        self.inner.current.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.current.borrow().is_some()
    }

    /// Register an observer. It is invoked on every state change with the
    /// new value; it is not invoked at registration time.
    pub fn subscribe(&self, f: impl Fn(Option<&Session>) + 'static) {
        self.inner.subscribers.borrow_mut().push(Box::new(f));
    }

    /// Attempt a login against the gateway and store the outcome.
    pub async fn login(
        &self,
        gateway: &Gateway,
        kind: IdentifierKind,
        identifier: &str,
        password: &str,
    ) -> Result<Session, GatewayError> {
        let request = LoginRequest::new(kind, identifier, password);
        let response = gateway.login(&request).await;
        self.complete_login(response)
    }

    /// Fold a login response into the store. On success the session is
    /// persisted and broadcast; on failure — including a success-shaped
    /// response missing its token or subject id — the store is left holding
    /// no session, so the invariant "session iff the most recent attempt
    /// succeeded" holds for any sequence of attempts.
    pub fn complete_login(
        &self,
        response: Result<LoginResponse, GatewayError>,
    ) -> Result<Session, GatewayError> {
        match response.and_then(session_from_response) {
            Ok(session) => {
                tracing::info!(subject = %session.subject_id, "login succeeded");
                self.put(session.clone());
                Ok(session)
            }
            Err(err) => {
                self.drop_session();
                Err(err)
            }
        }
    }

    /// Direct injection path: registration or verification completed with an
    /// immediately-issued token. A partial session is refused, not stored.
    pub fn establish(&self, session: Session) {
        if !usable(&session) {
            tracing::warn!("refusing to establish a partial session");
            return;
        }
        tracing::info!(subject = %session.subject_id, "session established");
        self.put(session);
    }

    /// Clear the session everywhere. Purely local; cannot fail and needs no
    /// network.
    pub fn logout(&self) {
        tracing::info!("logout");
        self.drop_session();
    }

    /// Same clearing as [`logout`](Self::logout), used when the gateway
    /// rejects the token (401 on a protected call).
    pub fn invalidate(&self) {
        tracing::warn!("session token rejected by the gateway, clearing");
        self.drop_session();
    }

    fn put(&self, session: Session) {
        self.inner.backend.save(&session);
        *self.inner.current.borrow_mut() = Some(session);
        self.notify();
    }

    fn drop_session(&self) {
        self.inner.backend.clear();
        let had = self.inner.current.borrow_mut().take().is_some();
        if had {
            self.notify();
        }
    }

    fn notify(&self) {
        let snapshot = self.current();
        for subscriber in self.inner.subscribers.borrow().iter() {
            subscriber(snapshot.as_ref());
        }
    }
}

fn usable(session: &Session) -> bool {
    !session.token.is_empty() && !session.subject_id.is_empty()
}

/// Some deployments issue a token directly with the registration ack. If
/// this one did, build the session for [`SessionStore::establish`];
/// otherwise the user logs in after verification.
pub fn session_from_registration(
    response: &api::RegisterResponse,
    fallback_farm_name: &str,
) -> Option<Session> {
    let token = response.token.clone().filter(|t| !t.is_empty())?;
    let user = response.user.as_ref()?;
    let subject_id = user
        .id
        .as_ref()
        .map(|id| id.as_string())
        .filter(|id| !id.is_empty())?;

    Some(Session {
        subject_id,
        farm_name: user
            .farm_name
            .clone()
            .unwrap_or_else(|| fallback_farm_name.to_string()),
        email: user.email.clone(),
        phone: user.phone_number.clone(),
        token,
    })
}

/// A success response still has to carry a token and a subject id; anything
/// less is an invalid-credentials failure, never a session.
fn session_from_response(response: LoginResponse) -> Result<Session, GatewayError> {
    let token = response.token.filter(|t| !t.is_empty());
    let user = response.user;
    let (Some(token), Some(user)) = (token, user) else {
        return Err(GatewayError::InvalidCredentials);
    };
    let subject_id = user
        .id
        .map(|id| id.as_string())
        .filter(|id| !id.is_empty())
        .ok_or(GatewayError::InvalidCredentials)?;

    Ok(Session {
        subject_id,
        farm_name: user.farm_name.unwrap_or_default(),
        email: user.email,
        phone: user.phone_number,
        token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::types::{AccountInfo, SubjectId};
    use store::MemoryBackend;

    fn ok_response(token: &str, id: &str) -> Result<LoginResponse, GatewayError> {
        Ok(LoginResponse {
            token: Some(token.to_string()),
            user: Some(AccountInfo {
                id: Some(SubjectId::Text(id.to_string())),
                farm_name: Some("Green Acres".into()),
                email: Some("farmer@example.com".into()),
                phone_number: None,
            }),
        })
    }

    fn make_store() -> (SessionStore<MemoryBackend>, MemoryBackend) {
        let backend = MemoryBackend::new();
        (SessionStore::new(backend.clone()), backend)
    }

    #[test]
    fn successful_login_persists_and_exposes_session() {
        let (store, backend) = make_store();
        let session = store.complete_login(ok_response("tok-1", "42")).unwrap();
        assert_eq!(session.subject_id, "42");
        assert_eq!(store.current(), Some(session.clone()));
        assert_eq!(backend.load(), Some(session));
    }

    #[test]
    fn failed_login_clears_any_previous_session() {
        let (store, backend) = make_store();
        store.complete_login(ok_response("tok-1", "42")).unwrap();

        let err = store
            .complete_login(Err(GatewayError::InvalidCredentials))
            .unwrap_err();
        assert_eq!(err, GatewayError::InvalidCredentials);
        assert!(store.current().is_none());
        assert!(backend.load().is_none());
    }

    #[test]
    fn partial_response_is_invalid_credentials_and_stores_nothing() {
        let (store, backend) = make_store();

        // Token but no user.
        let resp = Ok(LoginResponse {
            token: Some("tok".into()),
            user: None,
        });
        assert_eq!(
            store.complete_login(resp).unwrap_err(),
            GatewayError::InvalidCredentials
        );
        assert!(store.current().is_none());

        // User but empty token.
        let resp = ok_response("", "42");
        assert_eq!(
            store.complete_login(resp).unwrap_err(),
            GatewayError::InvalidCredentials
        );
        assert!(store.current().is_none());
        assert!(backend.load().is_none());
    }

    #[test]
    fn logout_clears_storage_and_is_idempotent() {
        let (store, backend) = make_store();
        store.complete_login(ok_response("tok", "7")).unwrap();

        store.logout();
        assert!(store.current().is_none());
        assert!(backend.load().is_none());

        // Logging out while anonymous stays quiet.
        store.logout();
        assert!(store.current().is_none());
    }

    #[test]
    fn admission_follows_the_session_at_every_point() {
        // The route guard admits iff a session exists right now; a broadcast
        // after logout must revoke admission immediately.
        let (store, _) = make_store();
        let admitted = Rc::new(RefCell::new(false));
        let admitted2 = Rc::clone(&admitted);
        store.subscribe(move |s| *admitted2.borrow_mut() = s.is_some());

        assert!(!store.is_authenticated());

        store.complete_login(ok_response("tok", "7")).unwrap();
        assert!(store.is_authenticated());
        assert!(*admitted.borrow());

        store.logout();
        assert!(!store.is_authenticated());
        assert!(!*admitted.borrow());

        store.complete_login(ok_response("tok-2", "7")).unwrap();
        store.invalidate();
        assert!(!store.is_authenticated());
        assert!(!*admitted.borrow());
    }

    #[test]
    fn subscribers_see_every_transition() {
        let (store, _) = make_store();
        let seen = Rc::new(RefCell::new(Vec::<bool>::new()));
        let seen2 = Rc::clone(&seen);
        store.subscribe(move |s| seen2.borrow_mut().push(s.is_some()));

        store.complete_login(ok_response("tok", "7")).unwrap();
        store.logout();
        store.logout(); // no change, no broadcast

        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn hydrate_restores_a_usable_session_only() {
        let backend = MemoryBackend::new();
        backend.save(&Session {
            subject_id: "7".into(),
            farm_name: "Hillside".into(),
            email: None,
            phone: Some("+15551234567".into()),
            token: "tok".into(),
        });
        let store = SessionStore::new(backend.clone());
        store.hydrate();
        assert!(store.is_authenticated());

        // A persisted partial session does not hydrate.
        backend.save(&Session {
            subject_id: "7".into(),
            farm_name: String::new(),
            email: None,
            phone: None,
            token: String::new(),
        });
        let store = SessionStore::new(backend);
        store.hydrate();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn registration_without_token_yields_no_session() {
        let resp = api::RegisterResponse {
            token: None,
            user: None,
            detail: Some("Verification e-mail sent.".into()),
        };
        assert!(session_from_registration(&resp, "Green Acres").is_none());

        let resp = api::RegisterResponse {
            token: Some("tok".into()),
            user: Some(AccountInfo {
                id: Some(SubjectId::Number(9)),
                farm_name: None,
                email: None,
                phone_number: Some("+15551234567".into()),
            }),
            detail: None,
        };
        let session = session_from_registration(&resp, "Green Acres").unwrap();
        assert_eq!(session.subject_id, "9");
        // The farm name the user typed fills in for a terse ack.
        assert_eq!(session.farm_name, "Green Acres");
    }

    #[test]
    fn establish_refuses_partial_sessions() {
        let (store, backend) = make_store();
        store.establish(Session {
            subject_id: String::new(),
            farm_name: "x".into(),
            email: None,
            phone: None,
            token: "tok".into(),
        });
        assert!(store.current().is_none());
        assert!(backend.load().is_none());
    }
}
