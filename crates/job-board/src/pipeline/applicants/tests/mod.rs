mod common;
mod filter;
mod routing;
