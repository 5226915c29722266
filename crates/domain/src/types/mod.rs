//! Request and response types for the Easemob REST API

pub mod auth;
pub mod envelope;
pub mod push;
pub mod push_label;
pub mod user;

pub use auth::{
    AppTokenRequest, AppTokenResponse, DynamicTokenPayload, GrantType, UserTokenRequest,
    UserTokenResponse,
};
pub use envelope::{ApiErrorBody, DataResponse, PagedResponse, UserResponse};
pub use push::{
    AsyncPushResult, LabelPushResult, PushMessage, PushRequest, PushStrategy, SyncPushData,
    SyncPushDetail, SyncPushResult,
};
pub use push_label::{LabelUsersResult, PushLabel, PushLabelUser};
pub use user::{
    DisconnectResult, NewUser, UserEntity, UserMetadata, UserOnlineDevice, UserOnlineStatus,
};
