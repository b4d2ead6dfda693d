// Shows round-tripping a date-time through a compiled pattern: print it, then
// parse the printed text back into field bindings and a resolved date/time.

fn main() {
    let formatter = chronofmt::pattern!("uuuu-MM-dd'T'HH:mm:ssXXX");

    let text = "2022-01-23T18:20:30+01:00";
    let resolved = formatter.parse(text).expect("well-formed input");

    println!("date: {:?}", resolved.date);
    println!("time: {:?}", resolved.time);
    println!("offset: {:?}", resolved.offset);

    let reprinted = formatter.format(&resolved.date.unwrap().at(resolved.time.unwrap())).unwrap();
    println!("reprinted: {reprinted}");
}
