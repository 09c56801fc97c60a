use super::{
    compensation::Compensation,
    in_flight::Claim,
    sync_state::SyncShared,
};
use crate::{
    dto::{MutationOutcome, NotificationId},
    error::Error,
    remote::{RemoteError, RemoteNotificationsService},
};
use std::sync::Arc;

///
/// Applies user actions to the store immediately, confirms them with
/// the remote service and compensates them when the service rejects them.
///
/// Remote failures are logged and reported as [MutationOutcome::RolledBack],
/// errors are returned only when the action could not start.
///
#[derive(Clone)]
pub struct OptimisticMutator {
    shared: Arc<SyncShared>,
    remote: Arc<dyn RemoteNotificationsService>,
}

impl OptimisticMutator {
    pub(crate) fn new(shared: Arc<SyncShared>, remote: Arc<dyn RemoteNotificationsService>) -> Self {
        Self { shared, remote }
    }

    ///
    /// ### Errors
    /// - [Error::NotificationNotExist] when notification is not stored
    /// - [Error::ItemMutationInFlight], [Error::BulkMutationInFlight] when
    ///     other mutation of the notification awaits confirmation
    /// - [Error::Unmounted] when center was unmounted
    ///
    #[tracing::instrument(name = "Mark Read", skip(self))]
    pub async fn mark_read(&self, id: &NotificationId) -> Result<MutationOutcome, Error> {
        let claim = Claim::Item(id.clone());
        let (session, compensation) = {
            let mut state = self.shared.lock_attached().await?;
            if !state.store.contains(id) {
                return Err(Error::NotificationNotExist(id.clone()));
            }
            state.in_flight.claim(&claim)?;

            let was_unread = state.store.mark_read(id).unwrap_or(false);
            self.shared.publish(&state);

            let compensation = match was_unread {
                true => Compensation::MarkUnread(id.clone()),
                false => Compensation::Nothing,
            };
            (state.session, compensation)
        };

        let result = self.remote.mark_read(id).await;

        Ok(self.settle(claim, session, result, compensation).await)
    }

    ///
    /// Skipped when there is no unread notification.
    ///
    /// ### Errors
    /// - [Error::BulkMutationInFlight], [Error::MutationsInFlight] when
    ///     other mutation awaits confirmation
    /// - [Error::Unmounted] when center was unmounted
    ///
    #[tracing::instrument(name = "Mark All Read", skip(self))]
    pub async fn mark_all_read(&self) -> Result<MutationOutcome, Error> {
        let claim = Claim::Bulk;
        let (session, compensation) = {
            let mut state = self.shared.lock_attached().await?;
            if state.store.unread_count() == 0 {
                tracing::debug!("no unread notifications");
                return Ok(MutationOutcome::Skipped);
            }
            state.in_flight.claim(&claim)?;

            let snapshot = state.store.snapshot();
            let count = state.store.mark_all_read();
            tracing::debug!(count, "marked notifications as read");
            self.shared.publish(&state);

            (state.session, Compensation::Restore(snapshot))
        };

        let result = self.remote.mark_all_read().await;

        Ok(self.settle(claim, session, result, compensation).await)
    }

    ///
    /// ### Errors
    /// - [Error::NotificationNotExist] when notification is not stored
    /// - [Error::ItemMutationInFlight], [Error::BulkMutationInFlight] when
    ///     other mutation of the notification awaits confirmation
    /// - [Error::Unmounted] when center was unmounted
    ///
    #[tracing::instrument(name = "Delete", skip(self))]
    pub async fn delete_notification(
        &self,
        id: &NotificationId,
    ) -> Result<MutationOutcome, Error> {
        let claim = Claim::Item(id.clone());
        let (session, compensation) = {
            let mut state = self.shared.lock_attached().await?;
            if !state.store.contains(id) {
                return Err(Error::NotificationNotExist(id.clone()));
            }
            state.in_flight.claim(&claim)?;

            let compensation = match state.store.remove(id) {
                Some(removed) => Compensation::Reinsert(removed),
                None => Compensation::Nothing,
            };
            self.shared.publish(&state);

            (state.session, compensation)
        };

        let result = self.remote.delete(id).await;

        Ok(self.settle(claim, session, result, compensation).await)
    }

    ///
    /// Deletes every notification after the user confirms it.
    /// Skipped when there is no notification, `confirm` is not called then.
    ///
    /// ### Errors
    /// - [Error::BulkMutationInFlight], [Error::MutationsInFlight] when
    ///     other mutation awaits confirmation
    /// - [Error::Unmounted] when center was unmounted
    ///
    #[tracing::instrument(name = "Clear All", skip_all)]
    pub async fn clear_all<F>(&self, confirm: F) -> Result<MutationOutcome, Error>
    where
        F: FnOnce() -> bool + Send,
    {
        {
            let state = self.shared.lock_attached().await?;
            if state.store.is_empty() {
                tracing::debug!("no notifications");
                return Ok(MutationOutcome::Skipped);
            }
        }

        // Lock is released while the user decides
        if !confirm() {
            tracing::debug!("user declined");
            return Ok(MutationOutcome::Declined);
        }

        let claim = Claim::Bulk;
        let (session, compensation) = {
            let mut state = self.shared.lock_attached().await?;
            if state.store.is_empty() {
                tracing::debug!("notifications cleared in the meantime");
                return Ok(MutationOutcome::Skipped);
            }
            state.in_flight.claim(&claim)?;

            let snapshot = state.store.snapshot();
            state.store.clear();
            self.shared.publish(&state);

            (state.session, Compensation::Restore(snapshot))
        };

        let result = self.remote.clear_all().await;

        Ok(self.settle(claim, session, result, compensation).await)
    }

    async fn settle(
        &self,
        claim: Claim,
        session: u64,
        result: Result<(), RemoteError>,
        compensation: Compensation,
    ) -> MutationOutcome {
        let mut state = self.shared.lock().await;
        state.in_flight.release(&claim);

        if self.shared.is_detached() {
            tracing::debug!("discarded remote result after unmount");
            return MutationOutcome::Discarded;
        }

        if state.session != session {
            tracing::debug!("discarded remote result of previous user");
            self.shared.publish(&state);
            return MutationOutcome::Discarded;
        }

        let outcome = match result {
            Ok(()) => {
                tracing::debug!("confirmed");
                MutationOutcome::Confirmed
            }
            Err(err) => {
                tracing::warn!(%err, "remote service rejected change, rolling back");
                compensation.apply(&mut state.store);
                MutationOutcome::RolledBack
            }
        };
        self.shared.publish(&state);

        outcome
    }
}
