//! Static front-end hosting.
//!
//! Serves the pre-built client bundle. Any GET that matches neither an API
//! route nor a file in the bundle returns the bundle's `index.html`, so
//! client-side routes survive a page reload. Register this service last.

use std::path::{Path, PathBuf};

use actix_files::{Files, NamedFile};
use actix_web::dev::{ServiceRequest, ServiceResponse, fn_service};

/// Entry document served for unmatched paths.
pub const INDEX_FILE: &str = "index.html";

/// Build the static file service rooted at `build_dir`.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use backend::inbound::http::frontend::frontend_service;
///
/// let app = App::new().service(frontend_service("client/build"));
/// ```
pub fn frontend_service(build_dir: impl AsRef<Path>) -> Files {
    let build_dir = build_dir.as_ref().to_path_buf();
    let index: PathBuf = build_dir.join(INDEX_FILE);
    Files::new("/", build_dir)
        .index_file(INDEX_FILE)
        .default_handler(fn_service(move |req: ServiceRequest| {
            let index = index.clone();
            async move {
                let (req, _) = req.into_parts();
                let file = NamedFile::open_async(index).await?;
                let res = file.into_response(&req);
                Ok(ServiceResponse::new(req, res))
            }
        }))
}
