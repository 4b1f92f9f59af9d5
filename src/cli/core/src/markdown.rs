/* src/cli/core/src/markdown.rs */

// Terminal rendering of library READMEs.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

use crate::ui::{BLUE, BOLD, CYAN, DIM, ITALIC, RESET, UNDERLINE, YELLOW};

/// Render Markdown to ANSI-styled text.
pub fn render_markdown(markdown: &str) -> String {
  let mut renderer = Renderer::default();
  for event in Parser::new(markdown) {
    renderer.event(event);
  }
  renderer.finish()
}

#[derive(Default)]
struct Renderer {
  out: String,
  // None for bullet lists, Some(next number) for ordered ones
  lists: Vec<Option<u64>>,
  quote_depth: usize,
  // one entry per open tag, true for block quotes
  open: Vec<bool>,
  in_code_block: bool,
  link_dest: Option<String>,
}

impl Renderer {
  fn event(&mut self, event: Event<'_>) {
    match event {
      Event::Start(tag) => self.start(tag),
      Event::End(tag) => self.end(tag),
      Event::Text(text) => {
        if self.in_code_block {
          for line in text.lines() {
            self.out.push_str(&format!("    {CYAN}{line}{RESET}\n"));
          }
        } else {
          self.out.push_str(&text);
        }
      }
      Event::Code(code) => self.out.push_str(&format!("{CYAN}`{code}`{RESET}")),
      Event::SoftBreak => self.out.push(' '),
      Event::HardBreak => self.newline(),
      Event::Rule => {
        self.block_gap();
        self.out.push_str(&format!("{DIM}{}{RESET}\n\n", "\u{2500}".repeat(40)));
      }
      Event::TaskListMarker(done) => self.out.push_str(if done { "[x] " } else { "[ ] " }),
      _ => {}
    }
  }

  fn start(&mut self, tag: Tag<'_>) {
    self.open.push(matches!(tag, Tag::BlockQuote(_)));
    match tag {
      Tag::Heading { level, .. } => {
        self.block_gap();
        self.out.push_str(BOLD);
        if level == HeadingLevel::H1 {
          self.out.push_str(UNDERLINE);
        }
        self.out.push_str(YELLOW);
      }
      Tag::Paragraph => {
        if self.lists.is_empty() {
          self.block_gap();
        }
        if self.quote_depth > 0 {
          self.out.push_str(&format!("{DIM}{}{RESET}", "\u{2502} ".repeat(self.quote_depth)));
        }
      }
      Tag::BlockQuote(_) => {
        self.block_gap();
        self.quote_depth += 1;
      }
      Tag::CodeBlock(_) => {
        self.block_gap();
        self.in_code_block = true;
      }
      Tag::List(start) => {
        if self.lists.is_empty() {
          self.block_gap();
        } else {
          self.newline();
        }
        self.lists.push(start);
      }
      Tag::Item => {
        let depth = self.lists.len().saturating_sub(1);
        self.out.push_str(&"  ".repeat(depth + 1));
        match self.lists.last_mut() {
          Some(Some(n)) => {
            self.out.push_str(&format!("{n}. "));
            *n += 1;
          }
          _ => self.out.push_str("\u{2022} "),
        }
      }
      Tag::Emphasis => self.out.push_str(ITALIC),
      Tag::Strong => self.out.push_str(BOLD),
      Tag::Link { dest_url, .. } => {
        self.out.push_str(&format!("{BLUE}{UNDERLINE}"));
        self.link_dest = Some(dest_url.into_string());
      }
      _ => {}
    }
  }

  fn end(&mut self, tag: TagEnd) {
    if self.open.pop() == Some(true) {
      self.quote_depth = self.quote_depth.saturating_sub(1);
    }
    match tag {
      TagEnd::Heading(_) => {
        self.out.push_str(RESET);
        self.out.push_str("\n\n");
      }
      TagEnd::Paragraph => {
        self.out.push('\n');
        if self.lists.is_empty() {
          self.out.push('\n');
        }
      }
      TagEnd::CodeBlock => {
        self.in_code_block = false;
        self.out.push('\n');
      }
      TagEnd::List(_) => {
        self.lists.pop();
        if self.lists.is_empty() {
          self.out.push('\n');
        }
      }
      TagEnd::Item => self.newline(),
      TagEnd::Emphasis | TagEnd::Strong => self.out.push_str(RESET),
      TagEnd::Link => {
        self.out.push_str(RESET);
        if let Some(dest) = self.link_dest.take() {
          self.out.push_str(&format!(" {DIM}({dest}){RESET}"));
        }
      }
      _ => {}
    }
  }

  /// Ensure the output ends with a newline.
  fn newline(&mut self) {
    if !self.out.is_empty() && !self.out.ends_with('\n') {
      self.out.push('\n');
    }
  }

  /// Ensure a blank line separates blocks.
  fn block_gap(&mut self) {
    self.newline();
    if !self.out.is_empty() && !self.out.ends_with("\n\n") {
      self.out.push('\n');
    }
  }

  fn finish(self) -> String {
    let mut out = self.out.trim_end().to_string();
    out.push('\n');
    out
  }
}
