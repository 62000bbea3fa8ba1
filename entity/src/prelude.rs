pub use super::follow::Entity as Follow;
pub use super::hashtag::Entity as Hashtag;
pub use super::like::Entity as Like;
pub use super::notification::Entity as Notification;
pub use super::post::Entity as Post;
pub use super::post_hashtag::Entity as PostHashtag;
pub use super::repost::Entity as Repost;
pub use super::session::Entity as Session;
pub use super::user::Entity as User;
