use std::str::FromStr;

use ansi_term::Colour;
use anyhow::{anyhow, Result};
use clap::Parser;

use crate::{
    config::ProviderConfig,
    pipeline::{
        colors::ColorMap,
        grouping::GroupSpec,
        matcher::{split_patterns, PatternSet},
        Category, ChartRequest, ChartSize,
    },
    render::{slices, Slice},
};

/// `NAME=VALUE` pair taken from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub key: String,
    pub value: String,
}

impl FromStr for Assignment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected NAME=VALUE, got {s}"))?;
        if key.is_empty() {
            return Err(anyhow!("Missing name in {s}"));
        }
        Ok(Self {
            key: key.to_owned(),
            value: value.to_owned(),
        })
    }
}

#[derive(Debug, Parser)]
pub struct ChartCommand {
    #[arg(long, short, help = "Stats to chart", default_value = "languages")]
    category: Category,
    #[arg(long, short, help = "WakaTime username")]
    user: String,
    #[arg(
        long,
        help = "Comma separated names to leave out. Use ** as a prefix or suffix to match endings or beginnings, for example \"**-old\" or \"scratch**\""
    )]
    hide: Vec<String>,
    #[arg(
        long,
        short,
        help = "Combine entries into one, for example --group \"Other=yaml,markdown\""
    )]
    group: Vec<Assignment>,
    #[arg(long, help = "Color of a group, for example --group-color Other=00ff00")]
    group_color: Vec<Assignment>,
    #[arg(long, help = "Color of an entry, for example --color Rust=dea584")]
    color: Vec<Assignment>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    #[command(flatten)]
    pub(super) providers: ProviderConfig,
}

impl ChartCommand {
    fn into_request(self) -> ChartRequest {
        let mut request = ChartRequest::new(self.category, self.user);

        let hide = self
            .hide
            .iter()
            .flat_map(|v| split_patterns(v))
            .collect::<PatternSet>();
        request.hide = (!hide.is_empty()).then_some(hide);

        let groups = self
            .group
            .into_iter()
            .map(|Assignment { key, value }| (key, split_patterns(&value).collect()))
            .collect::<GroupSpec>();
        request.groups = (!groups.is_empty()).then_some(groups);

        request.group_colors = to_color_map(self.group_color);
        request.colors = to_color_map(self.color);
        request.size = ChartSize {
            width: self.width,
            height: self.height,
        };
        request
    }
}

fn to_color_map(assignments: Vec<Assignment>) -> Option<ColorMap> {
    let colors = assignments
        .into_iter()
        .map(|Assignment { key, value }| (key, value))
        .collect::<ColorMap>();
    (!colors.is_empty()).then_some(colors)
}

/// Command to process `chart` command. Builds a chart once, saves it and prints its entries.
pub async fn process_chart_command(command: ChartCommand) -> Result<()> {
    let service = command.providers.build_service()?;
    let request = command.into_request();

    let chart = service.shape(&request).await?;
    let saved = service.render(&request, &chart).await?;

    let drawn = slices(&chart);
    for (index, entry) in chart.entries.iter().enumerate() {
        println!(
            "{}\t{}%\t{}\t{}",
            drawn.get(index).map(swatch).unwrap_or_default(),
            entry.percent,
            entry.text,
            entry.name
        );
    }

    match saved {
        Some(saved) => println!("\nSaved {}", saved.path.display()),
        None => return Err(anyhow!("Couldn't create a pie chart for some reason")),
    }
    Ok(())
}

fn swatch(slice: &Slice) -> String {
    match parse_hex(&slice.color) {
        Some((r, g, b)) => Colour::RGB(r, g, b).paint("■").to_string(),
        None => "■".to_owned(),
    }
}

/// Parses `#rgb` and `#rrggbb` colors.
fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#').filter(|v| v.is_ascii())?;
    let channel = |v: &str| u8::from_str_radix(v, 16).ok();
    match hex.len() {
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => {
            let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some((short(0)?, short(1)?, short(2)?))
        }
        _ => None,
    }
}
