/// Resolves a link found on a documentation page against that page's URL
///
/// The documentation tree only links with plain relative paths, optionally led
/// by `..` segments. Each `..` drops one directory from the base URL, and the
/// base's own file name is always dropped:
///
/// ```
/// use javadoc_harvest::url::resolve_absolute_url;
///
/// let base = "https://docs.example.com/api/java/awt/package-summary.html";
/// assert_eq!(
///     resolve_absolute_url(base, "Dialog.html"),
///     "https://docs.example.com/api/java/awt/Dialog.html"
/// );
/// assert_eq!(
///     resolve_absolute_url(base, "../../java/io/File.html"),
///     "https://docs.example.com/api/java/io/File.html"
/// );
/// ```
///
/// No further normalisation happens: `.` segments, query strings and absolute
/// links are carried through as-is.
pub fn resolve_absolute_url(base_url: &str, relative_url: &str) -> String {
    let base: Vec<&str> = base_url.split('/').collect();
    let relative: Vec<&str> = relative_url.split('/').collect();

    let levels = relative.iter().filter(|segment| **segment == "..").count();
    let keep = base.len().saturating_sub(levels + 1);
    let skip = levels.min(relative.len());

    format!("{}/{}", base[..keep].join("/"), relative[skip..].join("/"))
}
