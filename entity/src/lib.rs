pub mod prelude;

pub mod follow;
pub mod hashtag;
pub mod like;
pub mod notification;
pub mod post;
pub mod post_hashtag;
pub mod repost;
pub mod session;
pub mod user;
