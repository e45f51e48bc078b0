mod command;
mod http;
mod response;

pub use command::CommandHumanizer;
pub use http::HttpHumanizer;
pub use response::decode_response;
