use uriload::error::AppResult;

fn main() -> AppResult<()> {
    uriload::entry::run()
}
