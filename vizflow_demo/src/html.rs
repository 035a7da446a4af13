// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The HTML report.

use std::fmt::Write as _;

/// One SVG snapshot with a caption.
#[derive(Debug)]
pub(crate) struct Snapshot {
    pub(crate) caption: String,
    pub(crate) svg: String,
}

/// A titled group of snapshots from one view.
#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) snapshots: Vec<Snapshot>,
}

impl HtmlSection {
    pub(crate) fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            snapshots: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, caption: impl Into<String>, svg: String) {
        self.snapshots.push(Snapshot {
            caption: caption.into(),
            svg,
        });
    }
}

pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{title}</title>");
    out.push_str(
        "<style>\n\
         body { font-family: sans-serif; margin: 2em; color: #222; }\n\
         section { margin-bottom: 3em; }\n\
         figure { display: inline-block; margin: 0 1em 1em 0; vertical-align: top; }\n\
         figcaption { font-size: 0.85em; color: #555; }\n\
         svg { border: 1px solid #ddd; }\n\
         </style>\n</head>\n<body>\n",
    );
    let _ = writeln!(out, "<h1>{title}</h1>");
    for section in sections {
        out.push_str("<section>\n");
        let _ = writeln!(out, "<h2>{}</h2>", section.title);
        let _ = writeln!(out, "<p>{}</p>", section.description);
        for snap in &section.snapshots {
            out.push_str("<figure>\n");
            out.push_str(&snap.svg);
            let _ = writeln!(out, "<figcaption>{}</figcaption>", snap.caption);
            out.push_str("</figure>\n");
        }
        out.push_str("</section>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}
