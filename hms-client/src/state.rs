//! Application state
//!
//! Holds who is signed in and which property the back office is working on.
//! Both survive restarts through [`SnapshotStore`]; views follow changes via
//! [`AppState::subscribe`].

use std::sync::Arc;

use shared::models::{PropertySnapshot, User, UserSnapshot};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::{AuthApi, PropertiesApi, UsersApi};
use crate::storage::{PROPERTY_KEY, SnapshotStore, USER_KEY};
use crate::{ClientConfig, ClientError, ClientResult, HttpClient, SessionGateway};

/// Everything a view needs to know about the session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppSnapshot {
    pub user: Option<UserSnapshot>,
    pub property: Option<PropertySnapshot>,
}

/// Session-level state container
pub struct AppState<C: HttpClient = SessionGateway> {
    client: Arc<C>,
    store: SnapshotStore,
    tx: watch::Sender<AppSnapshot>,
}

impl AppState<SessionGateway> {
    /// Gateway and snapshot store built from one configuration
    pub fn from_config(config: ClientConfig) -> ClientResult<Self> {
        let store = SnapshotStore::new(config.state_dir.clone());
        let gateway = SessionGateway::new(config)?;
        Ok(Self::init(Arc::new(gateway), store))
    }
}

impl<C: HttpClient> AppState<C> {
    /// Restore persisted snapshots
    pub fn init(client: Arc<C>, store: SnapshotStore) -> Self {
        let snapshot = AppSnapshot {
            user: store.load(USER_KEY),
            property: store.load(PROPERTY_KEY),
        };
        debug!(
            user = snapshot.user.as_ref().map(|u| u.email.as_str()),
            property = snapshot.property.as_ref().map(|p| p.id),
            "App state restored"
        );
        let (tx, _) = watch::channel(snapshot);
        Self { client, store, tx }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn subscribe(&self) -> watch::Receiver<AppSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> AppSnapshot {
        self.tx.borrow().clone()
    }

    pub fn current_user(&self) -> Option<UserSnapshot> {
        self.tx.borrow().user.clone()
    }

    pub fn selected_property(&self) -> Option<PropertySnapshot> {
        self.tx.borrow().property.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().user.is_some()
    }

    /// Sign in and remember the user
    ///
    /// The user snapshot comes from the login response when it carries one,
    /// otherwise from the user list; failing both, it is derived from the email.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<UserSnapshot> {
        let resp = AuthApi::new(self.client.as_ref()).login(email, password).await?;

        let from_login = resp.data.and_then(|data| {
            let user = data.get("user").cloned().unwrap_or(data);
            serde_json::from_value::<UserSnapshot>(user).ok()
        });
        let user = match from_login {
            Some(user) => user,
            None => self.lookup_user(email).await,
        };

        self.set_user(Some(user.clone()))?;
        info!(email = %user.email, "User signed in");
        Ok(user)
    }

    async fn lookup_user(&self, email: &str) -> UserSnapshot {
        match UsersApi::new(self.client.as_ref()).list().await {
            Ok(resp) => resp
                .data
                .unwrap_or_default()
                .iter()
                .find(|u| u.email.eq_ignore_ascii_case(email))
                .map(user_snapshot)
                .unwrap_or_else(|| fallback_user(email)),
            Err(e) => {
                debug!(error = %e, "User lookup after login failed");
                fallback_user(email)
            }
        }
    }

    /// Best-effort server logout, then forget user and property
    pub async fn logout(&self) -> ClientResult<()> {
        if let Err(e) = AuthApi::new(self.client.as_ref()).logout().await {
            warn!(error = %e, "Logout request failed, clearing local state anyway");
        }
        self.store.delete(USER_KEY)?;
        self.store.delete(PROPERTY_KEY)?;
        self.tx.send_modify(|s| {
            s.user = None;
            s.property = None;
        });
        info!("User signed out");
        Ok(())
    }

    /// Probe the session with a refresh call
    ///
    /// Returns `false` (and forgets the user) when the backend rejects it.
    /// Network failures are returned as errors.
    pub async fn verify_session(&self) -> ClientResult<bool> {
        match AuthApi::new(self.client.as_ref()).refresh().await {
            Ok(_) => Ok(true),
            Err(ClientError::Http { status, .. }) if status.is_client_error() => {
                warn!(%status, "Session is no longer valid");
                self.set_user(None)?;
                Ok(false)
            }
            Err(ClientError::SessionExpired) => {
                self.set_user(None)?;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub fn select_property(&self, property: PropertySnapshot) -> ClientResult<()> {
        self.store.save(PROPERTY_KEY, &property)?;
        debug!(property_id = property.id, "Property selected");
        self.tx.send_modify(|s| s.property = Some(property));
        Ok(())
    }

    pub fn clear_property(&self) -> ClientResult<()> {
        self.store.delete(PROPERTY_KEY)?;
        self.tx.send_modify(|s| s.property = None);
        Ok(())
    }

    /// Drop the selection if it points at a property that no longer exists
    pub fn property_deleted(&self, id: i64) -> ClientResult<()> {
        let selected = self.tx.borrow().property.as_ref().map(|p| p.id);
        if selected == Some(id) {
            self.clear_property()?;
        }
        Ok(())
    }

    /// Pick the first property when none is selected yet
    pub async fn ensure_property_selected(&self) -> ClientResult<Option<PropertySnapshot>> {
        if let Some(property) = self.selected_property() {
            return Ok(Some(property));
        }

        let properties = PropertiesApi::new(self.client.as_ref())
            .list()
            .await?
            .data
            .unwrap_or_default();

        match properties.first() {
            Some(first) => {
                let snapshot = PropertySnapshot::from(first);
                self.select_property(snapshot.clone())?;
                Ok(Some(snapshot))
            }
            None => Ok(None),
        }
    }

    fn set_user(&self, user: Option<UserSnapshot>) -> ClientResult<()> {
        match &user {
            Some(u) => self.store.save(USER_KEY, u)?,
            None => self.store.delete(USER_KEY)?,
        }
        self.tx.send_modify(|s| s.user = user);
        Ok(())
    }
}

fn user_snapshot(user: &User) -> UserSnapshot {
    UserSnapshot {
        id: Some(user.id),
        name: Some(user.name.clone()),
        email: user.email.clone(),
        role_name: user.role_name.clone(),
    }
}

/// `{ name: <local part>, email, roleName: "User" }`
fn fallback_user(email: &str) -> UserSnapshot {
    let name = email.split('@').next().unwrap_or(email);
    UserSnapshot {
        name: Some(name.to_string()),
        role_name: Some("User".to_string()),
        ..UserSnapshot::from_email(email)
    }
}
