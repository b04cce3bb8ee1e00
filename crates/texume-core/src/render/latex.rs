//! LaTeX renderers.
//!
//! Each body section becomes a `\renewcommand` binding the section's command
//! (see [`Section::latex_command`]) to its rendered content; the document
//! layout decides where those commands are placed. User text is substituted
//! verbatim: LaTeX special characters (`\ % & _ $ #`) are not escaped.

use crate::{
  body::{DatedEntry, ParsedBody, PositionEntry},
  section::Section,
  template::{Template, Vars},
  Result,
};

/// Wraps a rendered section body.
pub const SECTION: Template = Template::new("\\renewcommand{\\{{SECTION}}}{\n{{BODY}}\n}\n");

/// One list environment holding every `date-points` entry.
pub const DATED_LIST: Template =
  Template::new("\\begin{itemize}\n{{ITEMS}}\\end{itemize}");

/// One `date-points` entry; multiple points are joined with `"; "`.
pub const DATED_ITEM: Template = Template::new("\\dateditem{{{DATE}}}{{{POINTS}}}\n");

/// One `org-loc-title-date-points` entry with its nested point list.
pub const POSITION: Template = Template::new(
  "\\orgentry{{{ORG}}}{{{LOC}}}{{{TITLE}}}{{{DATE}}}\n\\begin{itemize}\n{{ITEMS}}\\end{itemize}",
);

pub const POINT: Template = Template::new("\\item {{POINT}}\n");

/// Header macros; placeholders are section labels.
pub const HEADER: Template = Template::new(
  "\\renewcommand{\\phone}{{{Phone}}}\n\
   \\renewcommand{\\postmail}{{{Postmail}}}\n\
   \\renewcommand{\\email}{{{Email}}}\n\
   \\renewcommand{\\homepage}{{{Link}}}\n\
   \\renewcommand{\\name}{{{Name}}}\n",
);

/// Complete document handed to the LaTeX compiler. `default.tex` declares the
/// commands the résumé redefines; `layout.tex` typesets them.
pub const DOCUMENT: Template = Template::new("\\input{default}\n{{RESUME}}\\input{layout}\n");

pub fn render_section(section: Section, body: &ParsedBody) -> Result<String> {
  match body {
    ParsedBody::Text(text) => text_section(section, text),
    ParsedBody::DatePoints(entries) => date_points_section(section, entries),
    ParsedBody::OrgLocTitleDatePoints(entries) => {
      org_loc_title_date_points_section(section, entries)
    }
  }
}

pub fn text_section(section: Section, text: &str) -> Result<String> {
  wrap(section, text)
}

pub fn date_points_section(section: Section, entries: &[DatedEntry]) -> Result<String> {
  if entries.is_empty() {
    return wrap(section, "");
  }

  let mut items = String::new();
  for entry in entries {
    let points = entry.points.join("; ");
    items.push_str(
      &DATED_ITEM.fill(&Vars::new().set("DATE", &entry.date).set("POINTS", &points))?,
    );
  }

  let list = DATED_LIST.fill(&Vars::new().set("ITEMS", &items))?;
  wrap(section, &list)
}

pub fn org_loc_title_date_points_section(
  section: Section,
  entries: &[PositionEntry],
) -> Result<String> {
  let rendered = entries
    .iter()
    .map(position)
    .collect::<Result<Vec<_>>>()?;
  wrap(section, &rendered.join("\n"))
}

fn position(entry: &PositionEntry) -> Result<String> {
  let mut items = String::new();
  for point in &entry.points {
    items.push_str(&POINT.fill(&Vars::new().set("POINT", point))?);
  }

  POSITION.fill(
    &Vars::new()
      .set("ORG", &entry.organization)
      .set("LOC", &entry.location)
      .set("TITLE", &entry.title)
      .set("DATE", &entry.date)
      .set("ITEMS", &items),
  )
}

fn wrap(section: Section, body: &str) -> Result<String> {
  SECTION.fill(
    &Vars::new()
      .set("SECTION", section.latex_command())
      .set("BODY", body),
  )
}

/// Fill the header macros from header field values keyed by section label.
pub fn header(vars: &Vars<'_>) -> Result<String> { HEADER.fill(vars) }

/// Embed a rendered résumé in the compiler-ready document.
pub fn document(resume: &str) -> Result<String> {
  DOCUMENT.fill(&Vars::new().set("RESUME", resume))
}
