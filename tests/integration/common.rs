//! Fixtures shared by the integration tests
//!
//! Pages are served by a wiremock server under `/api/`; every package lives
//! at `/api/<package>/package-summary.html` and links its classes as
//! `<Class>.html` next to it.

use javadoc_harvest::config::Config;
use javadoc_harvest::PackageManifest;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct Harness {
    pub server: MockServer,
    pub dir: TempDir,
}

impl Harness {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Default config pointing at the mock server with outputs in the temp dir
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.crawler.base_url = format!("{}/api/", self.server.uri());
        config.crawler.package_concurrency = 4;
        config.crawler.class_concurrency = 4;
        config.crawler.request_timeout = 5;
        config.output.manifest_path = self.path("pkg_list.json").display().to_string();
        config.output.retry_path = self.path("pkg_retry").display().to_string();
        config.output.docs_dir = self.path("docs").display().to_string();
        config.output.logs_dir = self.path("logs").display().to_string();
        config
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn xml_path(&self, package: &str) -> PathBuf {
        self.path("docs").join(format!("{}.xml", package))
    }

    pub fn log_path(&self, package: &str) -> PathBuf {
        self.path("logs").join(format!("{}.log", package))
    }

    pub async fn mount_index(&self, package: &str, body: String) {
        self.mount(&index_path(package), ResponseTemplate::new(200).set_body_string(body))
            .await;
    }

    pub async fn mount_class(&self, package: &str, class: &str, delay_ms: u64) {
        self.mount(
            &class_path(package, class),
            ResponseTemplate::new(200)
                .set_body_string(class_page(class))
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .await;
    }

    pub async fn mount_class_page(&self, package: &str, class: &str, body: String) {
        self.mount(
            &class_path(package, class),
            ResponseTemplate::new(200).set_body_string(body),
        )
        .await;
    }

    pub async fn mount_status(&self, page: &str, status: u16) {
        self.mount(page, ResponseTemplate::new(status)).await;
    }

    /// Serves a package with the given classes, every class page reachable
    pub async fn mount_package(&self, package: &str, classes: &[&str]) {
        self.mount_index(package, index_page(classes)).await;
        for class in classes {
            self.mount_class(package, class, 0).await;
        }
    }

    /// Fails the test if the package index is ever requested
    pub async fn forbid_index(&self, package: &str) {
        Mock::given(method("GET"))
            .and(path(index_path(package)))
            .respond_with(ResponseTemplate::new(200).set_body_string(index_page(&[])))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    async fn mount(&self, page: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }
}

pub fn index_path(package: &str) -> String {
    format!("/api/{}/package-summary.html", package)
}

pub fn class_path(package: &str, class: &str) -> String {
    format!("/api/{}/{}.html", package, class)
}

pub fn manifest(packages: &[&str]) -> PackageManifest {
    PackageManifest::new(
        packages
            .iter()
            .map(|p| (p.to_string(), format!("{}/package-summary.html", p)))
            .collect(),
    )
}

/// A package index page with a class summary table
pub fn index_page(classes: &[&str]) -> String {
    let rows: String = classes
        .iter()
        .map(|class| {
            format!(
                r#"<tr class="altColor"><td class="colFirst"><a href="{class}.html" title="class in pkg">{class}</a></td>
<td class="colLast"><div class="block">The {class} class.</div></td></tr>
"#
            )
        })
        .collect();

    format!(
        r#"<html><body>
<div class="docSummary"><div class="block">A test package.</div></div>
<table class="packageSummary">
<caption><span>Class Summary</span><span class="tabEnd">&nbsp;</span></caption>
<tr><th class="colFirst" scope="col">Class</th><th class="colLast" scope="col">Description</th></tr>
{rows}</table>
</body></html>"#
    )
}

/// A class summary table whose second row has no class link
pub fn index_page_with_broken_row(class: &str) -> String {
    format!(
        r#"<html><body>
<table class="packageSummary">
<caption><span>Class Summary</span><span class="tabEnd">&nbsp;</span></caption>
<tr><th class="colFirst" scope="col">Class</th><th class="colLast" scope="col">Description</th></tr>
<tr class="altColor"><td class="colFirst"><a href="{class}.html">{class}</a></td>
<td class="colLast"><div class="block">The {class} class.</div></td></tr>
<tr class="rowColor"><td class="colFirst"><span>Broken</span></td><td class="colLast"></td></tr>
</table>
</body></html>"#
    )
}

/// A package index page without a class summary table
pub fn empty_index_page() -> String {
    r#"<html><body>
<div class="docSummary"><div class="block">Only interfaces.</div></div>
<table class="packageSummary">
<caption><span>Interface Summary</span><span class="tabEnd">&nbsp;</span></caption>
<tr><th class="colFirst" scope="col">Interface</th><th class="colLast" scope="col">Description</th></tr>
<tr class="altColor"><td class="colFirst"><a href="Shape.html">Shape</a></td><td class="colLast"></td></tr>
</table>
</body></html>"#
        .to_string()
}

/// A class page with one constructor and one `void run(int times)` method
pub fn class_page(class: &str) -> String {
    class_page_with_methods(class, "")
}

/// A class page whose second method row links one type but renders two parameters
pub fn class_page_with_mismatched_row(class: &str) -> String {
    class_page_with_methods(
        class,
        &format!(
            r#"<tr class="rowColor">
<td class="colFirst"><code>void</code></td>
<td class="colLast"><code><strong><a href="{class}.html#copy(int)">copy</a></strong>(int&nbsp;from, int&nbsp;to)</code>
<div class="block">Copies a range.</div>
</td></tr>"#
        ),
    )
}

fn class_page_with_methods(class: &str, extra_rows: &str) -> String {
    format!(
        r#"<html><body>
<table class="overviewSummary">
<caption><span>Constructors</span><span class="tabEnd">&nbsp;</span></caption>
<tr><th class="colOne" scope="col">Constructor and Description</th></tr>
<tr class="altColor">
<td class="colOne"><code><strong><a href="{class}.html#{class}()">{class}</a></strong>()</code>
<div class="block">Creates a {class}.</div>
</td></tr>
</table>
<table class="overviewSummary">
<caption><span>Methods</span><span class="tabEnd">&nbsp;</span></caption>
<tr><th class="colFirst" scope="col">Modifier and Type</th><th class="colLast" scope="col">Method and Description</th></tr>
<tr class="altColor">
<td class="colFirst"><code>void</code></td>
<td class="colLast"><code><strong><a href="{class}.html#run(int)">run</a></strong>(int&nbsp;times)</code>
<div class="block">Runs {class}.</div>
</td></tr>
{extra_rows}
</table>
</body></html>"#
    )
}
