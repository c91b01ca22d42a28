#[actix_web::main]
async fn main() -> std::io::Result<()> {
    birth_cert_server::run().await
}
