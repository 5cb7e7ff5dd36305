//! Services handling the notifications page and read flags.

use crate::domain::auth::AuthenticatedUser;
use crate::domain::notification::Notification;
use crate::domain::types::NotificationId;
use crate::dto::listing::ListPageData;
use crate::gateway::{ListGateway, NotificationActions, Notifications};
use crate::list::controller::ListController;
use crate::list::filter::InitialQuery;
use crate::services::listing::load_list_page;
use crate::services::{ServiceResult, ensure_access};

pub async fn load_notifications_page<G>(
    gateway: &G,
    user: &AuthenticatedUser,
    initial: InitialQuery,
    limit: usize,
) -> ServiceResult<ListPageData<Notification>>
where
    G: ListGateway<Notifications> + ?Sized,
{
    ensure_access(user)?;
    load_list_page::<Notifications, G>(gateway, initial, limit).await
}

/// Toggles the read flag of one notification.
///
/// The page is refetched afterwards since a `read` filter may now hide the row.
pub async fn mark_read<G>(
    controller: &mut ListController<Notifications, G>,
    user: &AuthenticatedUser,
    id: NotificationId,
    read: bool,
) -> ServiceResult<Notification>
where
    G: ListGateway<Notifications> + NotificationActions + 'static,
{
    ensure_access(user)?;
    let notification = controller
        .gateway()
        .mark_read(id, read)
        .await
        .map_err(|err| {
            log::error!("Failed to mark notification {id}: {err}");
            err
        })?;
    controller.refresh();
    Ok(notification)
}

/// Marks every notification as read and refetches the page.
pub async fn mark_all_read<G>(
    controller: &mut ListController<Notifications, G>,
    user: &AuthenticatedUser,
) -> ServiceResult<()>
where
    G: ListGateway<Notifications> + NotificationActions + 'static,
{
    ensure_access(user)?;
    controller
        .run_bulk(|gateway| async move { gateway.mark_all_read().await })
        .await?;
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::NaiveDate;

    use super::*;
    use crate::api::errors::ApiError;
    use crate::gateway::mock::MockNotificationGateway;
    use crate::pagination::{ListPage, PaginationEnvelope};
    use crate::services::ServiceError;
    use crate::services::test_support::{outsider, viewer_user};

    fn notification(id: i32, read: bool) -> Notification {
        Notification {
            id: NotificationId::new(id).unwrap(),
            title: format!("Notification {id}"),
            message: "Salle B204 indisponible".into(),
            read,
            created_at: NaiveDate::from_ymd_opt(2025, 10, 2)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        }
    }

    fn unread_page() -> ListPage<Notification> {
        ListPage::new(
            vec![notification(1, false), notification(2, false)],
            PaginationEnvelope::new(1, 10, 2),
        )
    }

    #[tokio::test]
    async fn mark_all_read_refetches() {
        let mut gateway = MockNotificationGateway::new();
        gateway.expect_mark_all_read().times(1).returning(|| Ok(()));
        gateway.expect_list().times(1).returning(|query| {
            Ok(ListPage::new(
                vec![notification(1, true), notification(2, true)],
                PaginationEnvelope::new(query.page, query.limit, 2),
            ))
        });

        let data = ListPageData::new(unread_page(), Default::default(), 10);
        let mut controller =
            ListController::from_page_data(Arc::new(gateway), data, Duration::from_millis(300));

        mark_all_read(&mut controller, &viewer_user()).await.unwrap();
        controller.settle().await;

        assert!(controller.items().iter().all(|n| n.read));
    }

    #[tokio::test]
    async fn failed_bulk_change_skips_refetch() {
        let mut gateway = MockNotificationGateway::new();
        gateway
            .expect_mark_all_read()
            .returning(|| Err(ApiError::Status {
                status: 500,
                message: "boom".into(),
            }));
        gateway.expect_list().never();

        let data = ListPageData::new(unread_page(), Default::default(), 10);
        let mut controller =
            ListController::from_page_data(Arc::new(gateway), data, Duration::from_millis(300));

        let result = mark_all_read(&mut controller, &viewer_user()).await;

        assert!(matches!(result, Err(ServiceError::Api(ApiError::Status { status: 500, .. }))));
        assert!(!controller.is_busy());
        assert_eq!(controller.items().len(), 2);
    }

    #[tokio::test]
    async fn mark_read_requires_access() {
        let gateway = MockNotificationGateway::new();
        let mut controller =
            ListController::new(Arc::new(gateway), 10, Duration::from_millis(300));

        let result = mark_read(
            &mut controller,
            &outsider(),
            NotificationId::new(1).unwrap(),
            true,
        )
        .await;

        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }
}
