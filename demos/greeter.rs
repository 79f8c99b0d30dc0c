use optsuite::{OptionDescriptor, Suite};

fn main() {
    let parser = Suite::new()
        .add(OptionDescriptor::new(Some('v'), Some("verbose"), false).unwrap())
        .add(OptionDescriptor::new(Some('n'), Some("name"), "world").unwrap())
        .add(
            OptionDescriptor::new(Some('t'), Some("times"), 1)
                .unwrap()
                .default_accept(3)
                .unwrap(),
        );

    let parsed = parser.parse();
    let name = parsed
        .get("name")
        .and_then(|v| v.as_text())
        .unwrap_or("world");
    let times = parsed
        .get("times")
        .and_then(|v| v.as_integer())
        .unwrap_or(1);

    for _ in 0..times {
        println!("Hello, {name}!");
    }

    if parsed
        .get("verbose")
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
    {
        println!("positionals: {:?}", parsed.positionals());
    }
}
