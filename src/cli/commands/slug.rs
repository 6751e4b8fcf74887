use minitoc::slugify;

/// Print one slug per line
pub fn handle_slug_command(texts: &[String]) {
    for text in texts {
        println!("{}", slugify(text));
    }
}
