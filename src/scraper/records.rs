use crate::scraper::models::{value_to_text, ListingRecord, ParsedPage};
use crate::scraper::CrawlError;
use std::io::{self, Write};
use tracing::debug;

/// Flattens a page sequence into its listings, in page then array order.
pub struct Records<I> {
    pages: I,
    current: std::vec::IntoIter<ListingRecord>,
    echo: Option<usize>,
    done: bool,
}

pub fn records<I>(pages: I, echo: Option<usize>) -> Records<I::IntoIter>
where
    I: IntoIterator<Item = Result<ParsedPage, CrawlError>>,
{
    Records {
        pages: pages.into_iter(),
        current: Vec::new().into_iter(),
        echo,
        done: false,
    }
}

impl<I> Iterator for Records<I>
where
    I: Iterator<Item = Result<ParsedPage, CrawlError>>,
{
    type Item = Result<ListingRecord, CrawlError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.current.next() {
                return Some(Ok(record));
            }
            if self.done {
                return None;
            }

            match self.pages.next() {
                None => {
                    self.done = true;
                    return None;
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Some(Ok(page)) => {
                    let listings: Vec<ListingRecord> = page.listings().collect();
                    debug!("Page {} holds {} listings", page.index, listings.len());

                    if let Some(n) = self.echo {
                        echo_listings(&mut io::stdout().lock(), &listings, n);
                    }

                    self.current = listings.into_iter();
                }
            }
        }
    }
}

/// Print up to `n` listings; a failing writer ends the echo, never the
/// stream. Returns how many were written.
pub fn echo_listings<W: Write>(out: &mut W, listings: &[ListingRecord], n: usize) -> usize {
    let mut written = 0;
    for listing in listings.iter().take(n) {
        if let Err(e) = write_listing(out, listing) {
            debug!("Echo of listing {} failed: {e}", listing.id().unwrap_or_default());
            break;
        }
        written += 1;
    }
    written
}

/// ```text
/// ** Annonce 123 **
/// 'prix': '250000'
/// ```
pub fn write_listing<W: Write>(out: &mut W, listing: &ListingRecord) -> io::Result<()> {
    writeln!(out, "** Annonce {} **", listing.id().unwrap_or_default())?;
    for (key, value) in listing.fields() {
        writeln!(out, "'{key}': '{}'", value_to_text(value))?;
    }
    writeln!(out)?;
    writeln!(out)
}
