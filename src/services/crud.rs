//! Create, update and delete through a page's list controller.
//!
//! Every mutation needs the admin role and a form that converts into the
//! resource payload; the controller then patches the visible list once the
//! API has confirmed.

use crate::domain::auth::AuthenticatedUser;
use crate::dto::listing::DeleteOutcome;
use crate::forms::FormError;
use crate::gateway::{ItemId, MutableResource, MutationGateway};
use crate::list::controller::ListController;
use crate::services::{ServiceResult, ensure_admin};

pub async fn create_item<R, G, F>(
    controller: &mut ListController<R, G>,
    user: &AuthenticatedUser,
    form: F,
) -> ServiceResult<R::Item>
where
    R: MutableResource,
    G: MutationGateway<R> + 'static,
    R::Create: TryFrom<F, Error = FormError>,
{
    ensure_admin(user)?;
    let payload = <R::Create as TryFrom<F>>::try_from(form).map_err(|err| {
        log::error!("Invalid {} form: {err}", R::PATH);
        err
    })?;
    Ok(controller.create(&payload).await?)
}

pub async fn update_item<R, G, F>(
    controller: &mut ListController<R, G>,
    user: &AuthenticatedUser,
    id: ItemId<R>,
    form: F,
) -> ServiceResult<R::Item>
where
    R: MutableResource,
    G: MutationGateway<R> + 'static,
    R::Update: TryFrom<F, Error = FormError>,
{
    ensure_admin(user)?;
    let payload = <R::Update as TryFrom<F>>::try_from(form).map_err(|err| {
        log::error!("Invalid {} form: {err}", R::PATH);
        err
    })?;
    Ok(controller.update(id, &payload).await?)
}

/// Deletes an item; a first attempt may come back as a conflict to confirm.
pub async fn delete_item<R, G>(
    controller: &mut ListController<R, G>,
    user: &AuthenticatedUser,
    id: ItemId<R>,
    force: bool,
) -> ServiceResult<DeleteOutcome>
where
    R: MutableResource,
    G: MutationGateway<R> + 'static,
{
    ensure_admin(user)?;
    Ok(controller.delete(id, force).await?)
}
