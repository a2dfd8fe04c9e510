use clap::{value_parser, Arg, ArgAction, Command};

/// Parses a field delimiter: a single ASCII char, or the word `tab`.
fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" => Ok(b'\t'),
        _ if value.len() == 1 && value.is_ascii() => Ok(value.as_bytes()[0]),
        _ => Err(format!(
            "'{}' is not a single ASCII char (use 'tab' for tabs)",
            value
        )),
    }
}

fn add_input(cmd: Command<'static>) -> Command<'static> {
    cmd.arg(
        Arg::new("input")
            .help("Input file")
            .default_value("-")
            .long_help("If not present or a single dash, standard input will be used"),
    )
}

fn add_table_options(cmd: Command<'static>) -> Command<'static> {
    const LONG_DELIMITER_HELP: &str = "\
Char separating the fields of every row of the input table.

The first row of the table is expected to hold column names, that are used
by other options to pick the columns to be plotted.  Use 'tab' for tab
separated values.
";
    cmd.arg(
        Arg::new("delimiter")
            .long("delimiter")
            .short('d')
            .help("Field separator of the input table")
            .long_help(LONG_DELIMITER_HELP)
            .default_value(",")
            .value_parser(parse_delimiter)
            .takes_value(true),
    )
    .arg(
        Arg::new("precision")
            .long("precision")
            .short('p')
            .help("Show that number of decimals (if omitted, 'human' units will be used)")
            .value_parser(value_parser!(usize))
            .takes_value(true),
    )
}

fn add_column(
    cmd: Command<'static>,
    name: &'static str,
    short: char,
    help: &'static str,
    default: &'static str,
) -> Command<'static> {
    cmd.arg(
        Arg::new(name)
            .long(name)
            .short(short)
            .help(help)
            .default_value(default)
            .takes_value(true),
    )
}

fn add_width(cmd: Command<'static>) -> Command<'static> {
    cmd.arg(
        Arg::new("width")
            .long("width")
            .short('w')
            .help("Use this many characters for the widest bar or box")
            .default_value("80")
            .value_parser(value_parser!(usize))
            .takes_value(true),
    )
}

pub fn get_app() -> Command<'static> {
    let mut boxplot = Command::new("box")
        .version(clap::crate_version!())
        .about("Plot a box-and-whisker chart of a numeric column, per category");
    boxplot = add_column(
        boxplot,
        "category",
        'c',
        "Column holding the group of every row",
        "Platform",
    );
    boxplot = add_column(
        boxplot,
        "value",
        'y',
        "Column holding the number to summarize",
        "Likes",
    );
    boxplot = add_input(add_width(add_table_options(boxplot)));

    let mut bars = Command::new("bars")
        .version(clap::crate_version!())
        .about("Plot a bar chart with a bar per series inside every group");
    bars = add_column(bars, "group", 'g', "Column holding the group", "Platform");
    bars = add_column(bars, "series", 's', "Column holding the series", "PostType");
    bars = add_column(
        bars,
        "value",
        'y',
        "Column holding the value (rows repeating group and series are averaged)",
        "AvgLikes",
    );
    bars = add_input(add_width(add_table_options(bars)));

    let mut line = Command::new("line")
        .version(clap::crate_version!())
        .about("Plot a line chart with a point per label, in input order")
        .arg(
            Arg::new("height")
                .long("height")
                .short('H')
                .help("Use that many rows for the plot")
                .default_value("20")
                .value_parser(value_parser!(usize))
                .takes_value(true),
        );
    line = add_column(
        line,
        "category",
        'c',
        "Column holding the label of every point (a date, for instance)",
        "Date",
    );
    line = add_column(
        line,
        "value",
        'y',
        "Column holding the value (rows repeating a label are averaged)",
        "AvgLikes",
    );
    line = add_input(add_table_options(line));

    Command::new("csvcharts")
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .max_term_width(100)
        .subcommand_required(true)
        .arg(
            Arg::new("color")
                .short('c')
                .long("color")
                .help("Use colors in the output")
                .value_parser(["auto", "no", "yes"])
                .default_value("auto")
                .takes_value(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Be more verbose")
                .action(ArgAction::SetTrue),
        )
        .subcommand(boxplot)
        .subcommand(bars)
        .subcommand(line)
}
