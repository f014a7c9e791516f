use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> =
            LazyLock::new(|| Selector::parse($css).expect("static selector"));
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($regex).expect("static regex"));
    };
}

// Summary tables are found through their caption text.
selector!(CAPTION_SPAN, "caption span");
selector!(TABLE_ROW, "tr");
selector!(FIRST_CELL, "td.colFirst");
selector!(LAST_CELL, "td.colLast");
selector!(ONE_CELL, "td.colOne");
selector!(CODE, "code");
selector!(DIV, "div");
selector!(BLOCK, "div.block");
selector!(LINK, "a");
selector!(MEMBER_NAME_LINK, "code strong a, code b a, code span.memberNameLink a");
selector!(NAMED_ANCHOR, "a[name]");
selector!(DOC_SUMMARY_BLOCK, ".docSummary div");

// Link target `(...)` followed, anywhere later, by rendered text `(...)`.
regex!(DUAL_SIGNATURE, r"\(([^)]+)\).*\(([^)]+)\)");
regex!(INHERITED_ANCHOR, r"^methods_inherited_from_class_(.+)$");
