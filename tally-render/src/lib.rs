//! Writes ledger items back out as canonical text.
//!
//! Everything the parser reads can be rendered and read again to the same
//! items. Layout that the parser keeps (number grouping, commodity placement)
//! is preserved; whitespace and quoting are normalized.

use std::{io, io::Write};

use tally_core::date::{format_date, format_time};
use tally_core::*;
use thiserror::Error;
use typed_builder::TypedBuilder;


/// Layout settings for [`CanonicalRenderer`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, TypedBuilder)]
pub struct RenderConfig {
    /// Spaces before each posting line. Never less than one, since a posting
    /// line must start with whitespace.
    pub indent: usize,

    /// Spaces between an account and its amount. Never less than two.
    pub gap: usize,

    /// Write inferred amounts of proofed postings out in full, as
    /// `Dr 10 USD`, instead of as they were written.
    #[builder(default)]
    pub expand_inferred: bool,

    #[builder(default)]
    pub radix: Radix,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            indent: 4,
            gap: 4,
            expand_inferred: false,
            radix: Radix::Period,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug)]
pub struct CanonicalRenderer {
    pub config: RenderConfig,
}

impl CanonicalRenderer {
    pub fn new(config: RenderConfig) -> Self {
        CanonicalRenderer { config }
    }
}

/// Renders parsed items with the default layout.
pub fn render<W: Write>(w: &mut W, items: &[FileItem]) -> Result<(), RenderError> {
    CanonicalRenderer::default().render(items, w)
}

/// Renders proofed items with the default layout.
pub fn render_proofed<W: Write>(w: &mut W, items: &[ProofedItem]) -> Result<(), RenderError> {
    CanonicalRenderer::default().render(items, w)
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("an io error occurred")]
    Io(#[from] io::Error),
}

pub trait Renderer<T, W: Write> {
    type Error;
    fn render(&self, renderable: T, write: &mut W) -> Result<(), Self::Error>;
}

/// Writes `items` one after another, with transactions set apart by blank lines.
fn render_blocks<T, W, B, E>(w: &mut W, items: &[T], is_block: B, mut each: E) -> Result<(), RenderError>
where
    W: Write,
    B: Fn(&T) -> bool,
    E: FnMut(&T, &mut W) -> Result<(), RenderError>,
{
    let mut after_block = false;
    for (i, item) in items.iter().enumerate() {
        let block = is_block(item);
        if i > 0 && (block || after_block) {
            writeln!(w)?;
        }
        each(item, w)?;
        after_block = block;
    }
    Ok(())
}

impl<'a, W: Write> Renderer<&'a [FileItem], W> for CanonicalRenderer {
    type Error = RenderError;
    fn render(&self, items: &'a [FileItem], w: &mut W) -> Result<(), Self::Error> {
        render_blocks(
            w,
            items,
            |item| matches!(item, FileItem::Transaction(_)),
            |item, w| self.render(item, w),
        )
    }
}

impl<'a, W: Write> Renderer<&'a [ProofedItem], W> for CanonicalRenderer {
    type Error = RenderError;
    fn render(&self, items: &'a [ProofedItem], w: &mut W) -> Result<(), Self::Error> {
        render_blocks(
            w,
            items,
            |item| matches!(item, ProofedItem::Transaction(_)),
            |item, w| self.render(item, w),
        )
    }
}

impl<'a, W: Write> Renderer<&'a FileItem, W> for CanonicalRenderer {
    type Error = RenderError;
    fn render(&self, item: &'a FileItem, w: &mut W) -> Result<(), Self::Error> {
        match item {
            FileItem::Comment(text) => writeln!(w, "#{}", text.value)?,
            FileItem::Price(price) => self.render(&price.value, w)?,
            FileItem::Transaction(transaction) => self.render(transaction, w)?,
        }
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a ProofedItem, W> for CanonicalRenderer {
    type Error = RenderError;
    fn render(&self, item: &'a ProofedItem, w: &mut W) -> Result<(), Self::Error> {
        match item {
            ProofedItem::Price(point) => self.render(&point.value.price, w),
            ProofedItem::Transaction(transaction) => self.render(transaction, w),
        }
    }
}

impl<'a, W: Write> Renderer<&'a Price, W> for CanonicalRenderer {
    type Error = RenderError;
    fn render(&self, price: &'a Price, w: &mut W) -> Result<(), Self::Error> {
        write!(w, "P ")?;
        self.render(&price.date_time, w)?;
        let rate = match &price.rate {
            Rate::Unsigned(magnitude) => magnitude.render(self.config.radix),
            Rate::Signed(signed) => self.signed_text(signed),
        };
        writeln!(
            w,
            " {} {}",
            commodity_text(&price.from),
            arranged_text(&rate, &price.to, price.arrangement)
        )?;
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a DateTime, W> for CanonicalRenderer {
    type Error = RenderError;
    fn render(&self, date_time: &'a DateTime, w: &mut W) -> Result<(), Self::Error> {
        write!(w, "{}", format_date(date_time.date))?;
        if let Some(time) = date_time.time {
            write!(w, " {}", format_time(time))?;
        }
        if let Some(zone) = date_time.zone {
            write!(w, " {}", zone)?;
        }
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a Transaction<Trio>, W> for CanonicalRenderer {
    type Error = RenderError;
    fn render(&self, transaction: &'a Transaction<Trio>, w: &mut W) -> Result<(), Self::Error> {
        self.render(&transaction.top_line.value, w)?;
        for posting in transaction.postings.iter() {
            self.render(&posting.value, w)?;
        }
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a Transaction<Troika>, W> for CanonicalRenderer {
    type Error = RenderError;
    fn render(&self, transaction: &'a Transaction<Troika>, w: &mut W) -> Result<(), Self::Error> {
        self.render(&transaction.top_line.value, w)?;
        for posting in transaction.postings.iter() {
            self.render(&posting.value, w)?;
        }
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a TopLine, W> for CanonicalRenderer {
    type Error = RenderError;
    fn render(&self, top_line: &'a TopLine, w: &mut W) -> Result<(), Self::Error> {
        self.render(&top_line.date_time, w)?;
        if let Some(flag) = &top_line.flag {
            write!(w, " {}", flag)?;
        }
        if let Some(number) = &top_line.number {
            write!(w, " ({})", number)?;
        }
        if let Some(payee) = &top_line.payee {
            write!(w, " {}", payee_text(payee))?;
        }
        for tag in &top_line.tags {
            write!(w, " ^{}", tag)?;
        }
        if let Some(forest) = &top_line.forest {
            write!(w, " ")?;
            self.render(forest, w)?;
        }
        writeln!(w)?;
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a Posting<Trio>, W> for CanonicalRenderer {
    type Error = RenderError;
    fn render(&self, posting: &'a Posting<Trio>, w: &mut W) -> Result<(), Self::Error> {
        self.posting_line(posting, &self.trio_text(&posting.amount), w)
    }
}

impl<'a, W: Write> Renderer<&'a Posting<Troika>, W> for CanonicalRenderer {
    type Error = RenderError;
    fn render(&self, posting: &'a Posting<Troika>, w: &mut W) -> Result<(), Self::Error> {
        self.posting_line(posting, &self.troika_text(&posting.amount), w)
    }
}

impl<'a, W: Write> Renderer<&'a Trio, W> for CanonicalRenderer {
    type Error = RenderError;
    fn render(&self, trio: &'a Trio, w: &mut W) -> Result<(), Self::Error> {
        write!(w, "{}", self.trio_text(trio))?;
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a Troika, W> for CanonicalRenderer {
    type Error = RenderError;
    fn render(&self, troika: &'a Troika, w: &mut W) -> Result<(), Self::Error> {
        write!(w, "{}", self.troika_text(troika))?;
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a Forest, W> for CanonicalRenderer {
    type Error = RenderError;
    fn render(&self, forest: &'a Forest, w: &mut W) -> Result<(), Self::Error> {
        write!(w, "{{")?;
        for (i, tree) in forest.iter().enumerate() {
            if i > 0 {
                write!(w, "; ")?;
            }
            self.render(&tree.value, w)?;
        }
        write!(w, "}}")?;
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a Tree, W> for CanonicalRenderer {
    type Error = RenderError;
    fn render(&self, tree: &'a Tree, w: &mut W) -> Result<(), Self::Error> {
        if let Some(scalar) = &tree.scalar {
            self.render(&scalar.value, w)?;
            if tree.children.is_some() {
                write!(w, " ")?;
            }
        }
        if let Some(children) = &tree.children {
            self.render(children, w)?;
        }
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a Scalar, W> for CanonicalRenderer {
    type Error = RenderError;
    fn render(&self, scalar: &'a Scalar, w: &mut W) -> Result<(), Self::Error> {
        match scalar {
            Scalar::Text(text) if is_bare_text(text) => write!(w, "{}", text)?,
            Scalar::Text(text) => write!(w, "{}", quote(text))?,
            Scalar::Date(date) => write!(w, "{}", format_date(*date))?,
            Scalar::Time(time) => write!(w, "{}", format_time(*time))?,
            Scalar::Zone(zone) => write!(w, "{}", zone)?,
            Scalar::Integer(n) => write!(w, "{}", n)?,
        }
        Ok(())
    }
}

impl CanonicalRenderer {
    fn posting_line<A, W: Write>(
        &self,
        posting: &Posting<A>,
        amount: &str,
        w: &mut W,
    ) -> Result<(), RenderError> {
        write!(w, "{:indent$}", "", indent = self.config.indent.max(1))?;
        if let Some(flag) = &posting.flag {
            write!(w, "{} ", flag)?;
        }
        write!(w, "{}", posting.account)?;
        if !amount.is_empty() {
            write!(w, "{:gap$}{}", "", amount, gap = self.config.gap.max(2))?;
        }
        if let Some(forest) = &posting.forest {
            write!(w, " ")?;
            self.render(forest, w)?;
        }
        writeln!(w)?;
        Ok(())
    }

    fn signed_text(&self, signed: &Signed) -> String {
        format!("{}{}", signed.pole.sign(), signed.brim.render(self.config.radix))
    }

    /// The amount as it was written.
    pub fn trio_text(&self, trio: &Trio) -> String {
        let radix = self.config.radix;
        match trio {
            Trio::SignedQtyCommodity(pole, brim, commodity, arrangement) => format!(
                "{} {}",
                pole.keyword(),
                arranged_text(&brim.render(radix), commodity, *arrangement)
            ),
            Trio::SignedQty(pole, brim) => format!("{} {}", pole.keyword(), brim.render(radix)),
            Trio::SideCommodity(pole, commodity) => {
                format!("{} {}", pole.keyword(), commodity_text(commodity))
            }
            Trio::Side(pole) => pole.keyword().to_string(),
            Trio::QtyCommodity(signed, commodity, arrangement) => {
                arranged_text(&self.signed_text(signed), commodity, *arrangement)
            }
            Trio::Qty(signed) => self.signed_text(signed),
            Trio::UnsignedCommodity(brim, commodity, arrangement) => {
                arranged_text(&brim.render(radix), commodity, *arrangement)
            }
            Trio::Unsigned(brim) => brim.render(radix),
            Trio::ZeroCommodity(nil, commodity, arrangement) => {
                arranged_text(&nil.render(radix), commodity, *arrangement)
            }
            Trio::Commodity(commodity) => commodity_text(commodity),
            Trio::Empty => String::new(),
        }
    }

    /// The written amount, or with `expand_inferred` the resolved one for
    /// amounts that were not written out in full.
    pub fn troika_text(&self, troika: &Troika) -> String {
        if !self.config.expand_inferred || troika.trio.is_determined() {
            return self.trio_text(&troika.trio);
        }
        let mut quantity = troika.quantity.abs().to_string();
        if self.config.radix == Radix::Comma {
            quantity = quantity.replace('.', ",");
        }
        let arranged = arranged_text(&quantity, &troika.commodity, troika.arrangement());
        match troika.pole() {
            Some(pole) => format!("{} {}", pole.keyword(), arranged),
            None => arranged,
        }
    }
}

fn arranged_text(number: &str, commodity: &Commodity, arrangement: Arrangement) -> String {
    let sep = if arrangement.space_between { " " } else { "" };
    match arrangement.orient {
        Orient::CommodityOnRight => format!("{}{}{}", number, sep, commodity_text(commodity)),
        Orient::CommodityOnLeft => {
            // A bare name would swallow the digits after it.
            let name = if arrangement.space_between || is_currency_symbol(commodity.as_str()) {
                commodity_text(commodity)
            } else {
                quote(commodity.as_str())
            };
            format!("{}{}{}", name, sep, number)
        }
    }
}

/// A single character from the Unicode currency symbol category, as of
/// Unicode 10. Symbols added later are quoted, which reads back the same.
fn is_currency_symbol(s: &str) -> bool {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => matches!(
            c,
            '$' | '\u{a2}'..='\u{a5}'
                | '\u{58f}'
                | '\u{60b}'
                | '\u{9f2}'..='\u{9f3}'
                | '\u{9fb}'
                | '\u{af1}'
                | '\u{bf9}'
                | '\u{e3f}'
                | '\u{17db}'
                | '\u{20a0}'..='\u{20bf}'
                | '\u{a838}'
                | '\u{fdfc}'
                | '\u{fe69}'
                | '\u{ff04}'
                | '\u{ffe0}'..='\u{ffe1}'
                | '\u{ffe5}'..='\u{ffe6}'
        ),
        _ => false,
    }
}

fn is_bare_commodity(s: &str) -> bool {
    s != "Dr"
        && s != "Cr"
        && s.split(':').all(|word| {
            let mut chars = word.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

fn commodity_text(commodity: &Commodity) -> String {
    let name = commodity.as_str();
    if is_currency_symbol(name) || is_bare_commodity(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

fn breaks_bare_word(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '{' | '}' | ';' | '#' | '"')
}

fn is_bare_payee(s: &str) -> bool {
    matches!(s.chars().next(), Some(c) if c.is_alphabetic())
        && s.split(' ').all(|word| {
            !word.is_empty()
                && !word.starts_with(|c: char| matches!(c, '^' | '[' | '('))
                && !word.contains(breaks_bare_word)
        })
}

fn payee_text(payee: &str) -> String {
    if is_bare_payee(payee) {
        payee.to_string()
    } else {
        quote(payee)
    }
}

fn is_bare_text(s: &str) -> bool {
    matches!(s.chars().next(), Some(c) if !c.is_ascii_digit() && c != '+' && c != '-')
        && !s.contains(breaks_bare_word)
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
