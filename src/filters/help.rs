// help.rs
use crate::filters::catalog::{
    ChoiceFilter, Example, FilterGroup, FlagValue, Section, SectionContent, SECTIONS,
};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use std::io::{self, Write};

pub fn write_section<W: Write>(out: &mut W, section: &Section) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", section.title)?;
    writeln!(out, "{}", "=".repeat(section.title.len()))?;

    match section.content {
        SectionContent::Choices(choices) => {
            for choice in choices {
                write_choice(out, choice)?;
            }
        }
        SectionContent::Groups { groups, example } => {
            for group in groups {
                write_group(out, group)?;
            }
            write_example(out, &example)?;
        }
    }
    Ok(())
}

fn write_choice<W: Write>(out: &mut W, choice: &ChoiceFilter) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "\t{}:", choice.title)?;
    writeln!(out, "\t-----")?;
    writeln!(out, "\t\t URL key: '{}'", choice.url_key)?;
    writeln!(out, "\t\t URL key options:")?;
    for (label, value) in choice.options {
        writeln!(out, "\t\t\t* {label}: '{value}'")?;
    }
    write_example(out, &choice.example)
}

fn write_group<W: Write>(out: &mut W, group: &FilterGroup) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "\t{}:", group.title)?;
    writeln!(out, "\t-----")?;
    for filter in group.filters {
        match filter.value {
            FlagValue::Fixed(value) => {
                writeln!(out, "\t\t\t* {}:\t{}={}", filter.name, filter.url_key, value)?
            }
            FlagValue::Number => {
                writeln!(out, "\t\t\t* {}:\t{}=<number>", filter.name, filter.url_key)?
            }
        }
    }
    Ok(())
}

fn write_example<W: Write>(out: &mut W, example: &Example) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "\t\tIf you want to {} {}", example.description, example.filters)?;
    writeln!(out)
}

pub fn write_all<W: Write>(out: &mut W) -> io::Result<()> {
    for section in SECTIONS {
        write_section(out, section)?;
    }
    Ok(())
}

/// Interactive menu over the catalog sections until the user quits.
pub fn browse() -> Result<(), dialoguer::Error> {
    let theme = ColorfulTheme::default();
    let mut items: Vec<&str> = SECTIONS.iter().map(|s| s.title).collect();
    items.push("Quit");

    loop {
        let choice = Select::with_theme(&theme)
            .with_prompt("What filters do you want to know about?")
            .items(&items)
            .default(0)
            .interact_opt()?;

        match choice.and_then(|i| SECTIONS.get(i)) {
            Some(section) => write_section(&mut io::stdout().lock(), section)?,
            None => return Ok(()),
        }
    }
}
