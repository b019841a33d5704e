use blog_api::{BaseUrl, Client, Request, RequestError};

#[tokio::main]
pub async fn main() -> Result<(), RequestError> {
    let client = Client::new(BaseUrl::default());

    let posts = client.send(Request::posts().list()).await?;
    for post in posts.into_inner() {
        println!("{} - {}", post.id, post.title);
    }
    Ok(())
}
