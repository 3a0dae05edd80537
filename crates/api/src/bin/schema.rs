use countdown_api::graphql::schema;

fn main() {
    let result = schema().as_sdl();

    std::fs::write("schema.gql", result).expect("Unable to write schema file");
}
