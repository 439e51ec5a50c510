mod helpers;
mod http;
mod import;
