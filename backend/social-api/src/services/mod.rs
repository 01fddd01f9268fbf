pub mod account;
pub mod files;
pub mod posts;
pub mod saves;
pub mod users;

pub use account::AccountService;
pub use files::FileService;
pub use posts::PostService;
pub use saves::SaveService;
pub use users::UserService;
